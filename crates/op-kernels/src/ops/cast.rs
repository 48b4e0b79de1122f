// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cast: elementwise dtype conversion at equal shape.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};
use num_complex::Complex;
use tensor_core::{DType, RealElement};

use crate::dispatch::dispatch_dtype;
use crate::elementwise::{copy_bytes, MIN_SHARD_ELEMS};

const OP: &str = "Cast";

/// Converts every element of the input to the output tensor's dtype.
///
/// Real-to-real conversions go through `f64` (wide enough to hold every
/// real tag exactly except the extremes of u64/i64, where rounding
/// follows `as`-cast semantics). Bool converts as 0/1, and any nonzero
/// value converts to `true`. Complex converts only to the other complex
/// width; mixing complex and real tags is rejected. A same-dtype cast
/// degenerates to a bit copy.
pub struct CastKernel;

impl CpuKernel for CastKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 1, 1)?;
        let x = ctx.input(0)?;
        let out = ctx.output(0)?;
        if out.shape() != x.shape() {
            return Err(KernelError::param_invalid(
                OP,
                format!("output shape {} does not match input {}", out.shape(), x.shape()),
            ));
        }
        let (src_d, dst_d) = (x.dtype(), out.dtype());
        if src_d == dst_d {
            let (inputs, outputs, _sched) = ctx.split();
            return copy_bytes(OP, &mut *outputs[0], inputs[0]);
        }
        match (src_d, dst_d) {
            (DType::Complex64, DType::Complex128) => widen_complex(ctx),
            (DType::Complex128, DType::Complex64) => narrow_complex(ctx),
            (s, d) if s.is_complex() || d.is_complex() => Err(KernelError::param_invalid(
                OP,
                format!("no conversion between {s} and {d}"),
            )),
            (s, _) => dispatch_dtype!(OP, s, cast_from(ctx), {
                I8 => i8, I16 => i16, I32 => i32, I64 => i64,
                U8 => u8, U16 => u16, U32 => u32, U64 => u64,
                F16 => half::f16, F32 => f32, F64 => f64, Bool => bool,
            }),
        }
    }
}

fn cast_from<S: RealElement>(ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
    let dst_d = ctx.output(0)?.dtype();
    dispatch_dtype!(OP, dst_d, convert::<S>(ctx), {
        I8 => i8, I16 => i16, I32 => i32, I64 => i64,
        U8 => u8, U16 => u16, U32 => u32, U64 => u64,
        F16 => half::f16, F32 => f32, F64 => f64, Bool => bool,
    })
}

fn convert<S: RealElement, D: RealElement>(
    ctx: &mut KernelContext<'_>,
) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let src = inputs[0].as_slice::<S>()?;
    let dst = outputs[0].as_slice_mut::<D>()?;
    sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
        for (k, d) in chunk.iter_mut().enumerate() {
            *d = D::from_f64(src[start + k].to_f64());
        }
        Ok::<(), KernelError>(())
    })
}

fn widen_complex(ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let src = inputs[0].as_slice::<Complex<f32>>()?;
    let dst = outputs[0].as_slice_mut::<Complex<f64>>()?;
    sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
        for (k, d) in chunk.iter_mut().enumerate() {
            let v = src[start + k];
            *d = Complex::new(f64::from(v.re), f64::from(v.im));
        }
        Ok::<(), KernelError>(())
    })
}

fn narrow_complex(ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let src = inputs[0].as_slice::<Complex<f64>>()?;
    let dst = outputs[0].as_slice_mut::<Complex<f32>>()?;
    sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
        for (k, d) in chunk.iter_mut().enumerate() {
            let v = src[start + k];
            *d = Complex::new(v.re as f32, v.im as f32);
        }
        Ok::<(), KernelError>(())
    })
}
