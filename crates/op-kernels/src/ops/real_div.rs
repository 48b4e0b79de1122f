// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting elementwise division.

use std::ops::Div;

use kernel_api::{CpuKernel, KernelContext, KernelError};
use num_complex::Complex;
use tensor_core::Element;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::{binary_elementwise, binary_prologue};

const OP: &str = "RealDiv";

/// `out = x1 / x2` over the broadcast of the two input shapes.
///
/// Floating and complex dtypes only: division by zero follows IEEE 754
/// (inf/NaN), which integer dtypes cannot represent, so those tags are
/// rejected rather than given trapping semantics.
pub struct RealDivKernel;

impl CpuKernel for RealDivKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        let dtype = binary_prologue(ctx)?;
        dispatch_dtype!(OP, dtype, run(ctx), {
            F16 => half::f16, F32 => f32, F64 => f64,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

fn run<T: Element + Div<Output = T>>(ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
    binary_elementwise::<T, _>(OP, ctx, |a, b| a / b)
}
