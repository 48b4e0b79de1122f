// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ScatterElements: per-element writes along an axis.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};
use num_complex::Complex;
use tensor_core::{Element, Shape};

use crate::dispatch::dispatch_dtype;
use crate::elementwise::copy_bytes;
use crate::ops::{normalize_axis, read_index_vec};

const OP: &str = "ScatterElements";

/// Copies `data` into the output, then overwrites selected elements:
/// for every position `pos` of `updates`, the output element whose
/// coordinate equals `pos` with the `axis` component replaced by
/// `indices[pos]` receives `updates[pos]`.
///
/// `indices` and `updates` share one shape, with each dimension no
/// larger than the matching `data` dimension. Negative indices count
/// from the end of the axis. When two updates target the same element
/// the one later in row-major `updates` order wins; the writes run
/// sequentially to keep that order deterministic.
pub struct ScatterElementsKernel;

impl CpuKernel for ScatterElementsKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 3, 1)?;
        let data = ctx.input(0)?;
        let indices_t = ctx.input(1)?;
        let updates = ctx.input(2)?;
        let out = ctx.output(0)?;

        let dims = data.shape().dims().to_vec();
        if dims.is_empty() {
            return Err(KernelError::param_invalid(OP, "data must have rank >= 1"));
        }
        let axis = normalize_axis(OP, ctx.attr_int_or("axis", 0)?, dims.len())?;

        if indices_t.shape() != updates.shape() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "indices shape {} does not match updates shape {}",
                    indices_t.shape(),
                    updates.shape()
                ),
            ));
        }
        let idx_dims = indices_t.shape().dims().to_vec();
        if idx_dims.len() != dims.len() || idx_dims.iter().zip(&dims).any(|(i, d)| i > d) {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "indices shape {} does not fit data shape {}",
                    indices_t.shape(),
                    data.shape()
                ),
            ));
        }
        if updates.dtype() != data.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "updates dtype {} does not match data dtype {}",
                    updates.dtype(),
                    data.dtype()
                ),
            ));
        }
        if out.shape() != data.shape() || out.dtype() != data.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                "output must have the shape and dtype of data",
            ));
        }

        let axis_size = dims[axis];
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

        dispatch_dtype!(OP, data.dtype(), run(ctx, &indices, axis), {
            I8 => i8, I16 => i16, I32 => i32, I64 => i64,
            U8 => u8, U16 => u16, U32 => u32, U64 => u64,
            F16 => half::f16, F32 => f32, F64 => f64, Bool => bool,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

fn run<T: Element>(
    ctx: &mut KernelContext<'_>,
    indices: &[usize],
    axis: usize,
) -> Result<(), KernelError> {
    let (inputs, outputs, _sched) = ctx.split();
    let data_strides = inputs[0].shape().strides();
    let idx_dims = inputs[1].shape().dims().to_vec();
    let idx_strides = Shape::new(idx_dims.clone()).strides();

    copy_bytes(OP, &mut *outputs[0], inputs[0])?;
    let upd = inputs[2].as_slice::<T>()?;
    let dst = outputs[0].as_slice_mut::<T>()?;

    for (u_lin, &v) in upd.iter().enumerate() {
        let mut rem = u_lin;
        let mut dst_lin = 0usize;
        for dim in 0..idx_dims.len() {
            let coord = rem / idx_strides[dim];
            rem %= idx_strides[dim];
            let coord = if dim == axis { indices[u_lin] } else { coord };
            dst_lin += coord * data_strides[dim];
        }
        dst[dst_lin] = v;
    }
    Ok(())
}
