// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! PadD: zero-padding with compile-time-known pad widths.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};
use num_complex::Complex;
use tensor_core::Element;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::MIN_SHARD_ELEMS;

const OP: &str = "PadD";

/// Pads the input with the dtype's zero value.
///
/// The `paddings` attribute holds `[before_0, after_0, before_1,
/// after_1, ...]`, two entries per input dimension, all non-negative.
/// Output dimension `d` is `before_d + in_d + after_d`.
pub struct PadDKernel;

impl CpuKernel for PadDKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 1, 1)?;
        let x = ctx.input(0)?;
        let out = ctx.output(0)?;
        let in_dims = x.shape().dims().to_vec();
        let rank = in_dims.len();

        let paddings = ctx.attr_int_list("paddings")?;
        if paddings.len() != 2 * rank {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "paddings has {} entries, expected {} for rank {rank}",
                    paddings.len(),
                    2 * rank
                ),
            ));
        }
        let mut before = Vec::with_capacity(rank);
        let mut expect = Vec::with_capacity(rank);
        for d in 0..rank {
            let (lo, hi) = (paddings[2 * d], paddings[2 * d + 1]);
            if lo < 0 || hi < 0 {
                return Err(KernelError::param_invalid(
                    OP,
                    format!("negative padding ({lo}, {hi}) at dimension {d}"),
                ));
            }
            before.push(lo as usize);
            expect.push(lo as usize + in_dims[d] + hi as usize);
        }
        if out.shape().dims() != expect {
            return Err(KernelError::param_invalid(
                OP,
                format!("output shape {} does not match padded shape", out.shape()),
            ));
        }
        if out.dtype() != x.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "output dtype {} does not match input dtype {}",
                    out.dtype(),
                    x.dtype()
                ),
            ));
        }

        dispatch_dtype!(OP, x.dtype(), run(ctx, &before), {
            I8 => i8, I16 => i16, I32 => i32, I64 => i64,
            U8 => u8, U16 => u16, U32 => u32, U64 => u64,
            F16 => half::f16, F32 => f32, F64 => f64, Bool => bool,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

fn run<T: Element>(ctx: &mut KernelContext<'_>, before: &[usize]) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let in_dims = inputs[0].shape().dims().to_vec();
    let in_strides = inputs[0].shape().strides();
    let out_strides = outputs[0].shape().strides();
    let src = inputs[0].as_slice::<T>()?;
    let dst = outputs[0].as_slice_mut::<T>()?;

    sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
        for (k, d) in chunk.iter_mut().enumerate() {
            let mut rem = start + k;
            let mut src_lin = 0usize;
            let mut inside = true;
            for dim in 0..in_dims.len() {
                let coord = rem / out_strides[dim];
                rem %= out_strides[dim];
                if coord < before[dim] || coord >= before[dim] + in_dims[dim] {
                    inside = false;
                    break;
                }
                src_lin += (coord - before[dim]) * in_strides[dim];
            }
            *d = if inside { src[src_lin] } else { T::zero() };
        }
        Ok::<(), KernelError>(())
    })
}
