// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Broadcasting elementwise subtraction.

use kernel_api::{CpuKernel, KernelContext, KernelError};
use num_complex::Complex;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::{binary_elementwise, binary_prologue, ArithElement};

const OP: &str = "Sub";

/// `out = x1 - x2` over the broadcast of the two input shapes.
///
/// Integer subtraction wraps; saturation is not part of the contract.
pub struct SubKernel;

impl CpuKernel for SubKernel {
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
    binary_elementwise::<T, _>(OP, ctx, |a, b| a.sub_elem(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{DType, Shape, Tensor};

    use crate::testutil::sched;

    #[test]
    fn test_basic_sub() {
        let sched = sched();
        let x1 = Tensor::from_slice(Shape::vector(3), &[10.0f32, 20.0, 30.0]).unwrap();
        let x2 = Tensor::from_slice(Shape::vector(3), &[1.0f32, 2.0, 3.0]).unwrap();
        let mut out = Tensor::zeros(Shape::vector(3), DType::F32);
        let mut ctx = KernelContext::build(OP)
            .input(&x1)
            .input(&x2)
            .output(&mut out)
            .finish(&sched);
        SubKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(out.as_slice::<f32>().unwrap(), &[9.0, 18.0, 27.0]);
    }

    #[test]
    fn test_unsigned_wraps() {
        let sched = sched();
        let x1 = Tensor::from_slice(Shape::vector(2), &[0u8, 5]).unwrap();
        let x2 = Tensor::from_slice(Shape::vector(2), &[1u8, 2]).unwrap();
        let mut out = Tensor::zeros(Shape::vector(2), DType::U8);
        let mut ctx = KernelContext::build(OP)
            .input(&x1)
            .input(&x2)
            .output(&mut out)
            .finish(&sched);
        SubKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(out.as_slice::<u8>().unwrap(), &[255, 3]);
    }

    #[test]
    fn test_broadcast_column_minus_row() {
        let sched = sched();
        let x1 = Tensor::from_slice(Shape::new(vec![2, 1]), &[5i64, 10]).unwrap();
        let x2 = Tensor::from_slice(Shape::new(vec![1, 2]), &[1i64, 2]).unwrap();
        let mut out = Tensor::zeros(Shape::new(vec![2, 2]), DType::I64);
        let mut ctx = KernelContext::build(OP)
            .input(&x1)
            .input(&x2)
            .output(&mut out)
            .finish(&sched);
        SubKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(out.as_slice::<i64>().unwrap(), &[4, 3, 9, 8]);
    }
}
