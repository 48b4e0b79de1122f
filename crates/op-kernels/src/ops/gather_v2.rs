// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! GatherV2: index-based selection along an axis.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};
use num_complex::Complex;
use tensor_core::Element;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::MIN_SHARD_ELEMS;
use crate::ops::{normalize_axis, read_index_vec};

const OP: &str = "GatherV2";

/// Selects slices of `params` along `axis` at the positions named by
/// `indices`.
///
/// With `batch_dims = b` (default 0) the leading `b` dimensions of
/// `params` and `indices` are paired instead of crossed: batch row `i`
/// of the output gathers from batch row `i` of `params` using batch row
/// `i` of `indices`. The output shape is
/// `params[..axis] ++ indices[b..] ++ params[axis+1..]`.
///
/// Negative indices count from the end of the axis. Every index is
/// validated before the first output write.
pub struct GatherV2Kernel;

impl CpuKernel for GatherV2Kernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 2, 1)?;
        let params = ctx.input(0)?;
        let indices_t = ctx.input(1)?;
        let out = ctx.output(0)?;

        let p = params.shape().dims().to_vec();
        if p.is_empty() {
            return Err(KernelError::param_invalid(OP, "params must have rank >= 1"));
        }
        let axis = normalize_axis(OP, ctx.attr_int("axis")?, p.len())?;

        let i_dims = indices_t.shape().dims().to_vec();
        let batch_dims = ctx.attr_int_or("batch_dims", 0)?;
        if batch_dims < 0 || batch_dims as usize > i_dims.len() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "batch_dims {batch_dims} out of range for indices rank {}",
                    i_dims.len()
                ),
            ));
        }
        let b = batch_dims as usize;
        if b > axis {
            return Err(KernelError::param_invalid(
                OP,
                format!("batch_dims {b} must not exceed axis {axis}"),
            ));
        }
        if p[..b] != i_dims[..b] {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "leading {b} dims of params {} and indices {} differ",
                    params.shape(),
                    indices_t.shape()
                ),
            ));
        }

        let mut expect = Vec::with_capacity(p.len() + i_dims.len());
        expect.extend_from_slice(&p[..axis]);
        expect.extend_from_slice(&i_dims[b..]);
        expect.extend_from_slice(&p[axis + 1..]);
        if out.shape().dims() != expect {
            return Err(KernelError::param_invalid(
                OP,
                format!("output shape {} does not match gather result", out.shape()),
            ));
        }
        if out.dtype() != params.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "output dtype {} does not match params dtype {}",
                    out.dtype(),
                    params.dtype()
                ),
            ));
        }

        let axis_size = p[axis];
        let raw = read_index_vec(OP, indices_t)?;
        let mut indices = Vec::with_capacity(raw.len());
        for &v in &raw {
            let n = if v < 0 { v + axis_size as i64 } else { v };
            if n < 0 || n >= axis_size as i64 {
                return Err(KernelError::param_invalid(
                    OP,
                    format!("index {v} out of range for axis size {axis_size}"),
                ));
            }
            indices.push(n as usize);
        }

        let sizes = GatherSizes {
            outer: p[b..axis].iter().product(),
            axis_size,
            inner: p[axis + 1..].iter().product(),
            picks: i_dims[b..].iter().product(),
        };

        dispatch_dtype!(OP, params.dtype(), run(ctx, &indices, &sizes), {
            I8 => i8, I16 => i16, I32 => i32, I64 => i64,
            U8 => u8, U16 => u16, U32 => u32, U64 => u64,
            F16 => half::f16, F32 => f32, F64 => f64, Bool => bool,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

/// Iteration extents of the gather loop. `picks` is the number of
/// gathered positions per batch row (product of the non-batch indices
/// dims); the batch extent itself is implied by the output length.
struct GatherSizes {
    outer: usize,
    axis_size: usize,
    inner: usize,
    picks: usize,
}

fn run<T: Element>(
    ctx: &mut KernelContext<'_>,
    indices: &[usize],
    sz: &GatherSizes,
) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let src = inputs[0].as_slice::<T>()?;
    let dst = outputs[0].as_slice_mut::<T>()?;
    // Output linear index decomposes as (batch, outer, pick, inner).
    sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
        for (k, d) in chunk.iter_mut().enumerate() {
            let lin = start + k;
            let inner = lin % sz.inner;
            let rest = lin / sz.inner;
            let pick = rest % sz.picks;
            let rest = rest / sz.picks;
            let outer = rest % sz.outer;
            let batch = rest / sz.outer;
            let j = indices[batch * sz.picks + pick];
            let s = (((batch * sz.outer + outer) * sz.axis_size) + j) * sz.inner + inner;
            *d = src[s];
        }
        Ok::<(), KernelError>(())
    })
}
