// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting elementwise multiplication.

use kernel_api::{CpuKernel, KernelContext, KernelError};
use num_complex::Complex;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::{binary_elementwise, binary_prologue, ArithElement};

const OP: &str = "Mul";

/// `out = x1 * x2` over the broadcast of the two input shapes.
/// Integer overflow wraps.
pub struct MulKernel;

impl CpuKernel for MulKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        let dtype = binary_prologue(ctx)?;
        dispatch_dtype!(OP, dtype, run(ctx), {
            I8 => i8, I16 => i16, I32 => i32, I64 => i64,
            U8 => u8, U16 => u16, U32 => u32, U64 => u64,
            F16 => half::f16, F32 => f32, F64 => f64,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

fn run<T: ArithElement>(ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
    binary_elementwise::<T, _>(OP, ctx, |a, b| a.mul_elem(b))
}
