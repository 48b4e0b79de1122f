// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Unpack: splits a tensor into slices along one axis.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};

use crate::ops::normalize_axis;

const OP: &str = "Unpack";

/// Splits the input into `num` outputs along `axis`, each output
/// dropping that dimension: input `[2, 3]` unpacked along axis 0 yields
/// two `[3]` tensors.
///
/// The copy is value-agnostic, so it moves whole inner rows of bytes
/// instead of dispatching on dtype.
pub struct UnpackKernel;

impl CpuKernel for UnpackKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        let num = ctx.attr_int("num")?;
        if num < 1 {
            return Err(KernelError::param_invalid(
                OP,
                format!("num must be positive, got {num}"),
            ));
        }
        let num = num as usize;
        check_io(ctx, 1, num)?;

        let x = ctx.input(0)?;
        let dims = x.shape().dims().to_vec();
        if dims.is_empty() {
            return Err(KernelError::param_invalid(OP, "input must have rank >= 1"));
        }
        let axis = normalize_axis(OP, ctx.attr_int_or("axis", 0)?, dims.len())?;
        if dims[axis] != num {
            return Err(KernelError::param_invalid(
                OP,
                format!("axis dimension {} does not match num {num}", dims[axis]),
            ));
        }

        let mut expect = dims.clone();
        expect.remove(axis);
        for j in 0..num {
            let out = ctx.output(j)?;
            if out.shape().dims() != expect {
                return Err(KernelError::param_invalid(
                    OP,
                    format!("output {j} shape {} does not match slice shape", out.shape()),
                ));
            }
            if out.dtype() != x.dtype() {
                return Err(KernelError::param_invalid(
                    OP,
                    format!(
                        "output {j} dtype {} does not match input dtype {}",
                        out.dtype(),
                        x.dtype()
                    ),
                ));
            }
        }

        let outer: usize = dims[..axis].iter().product();
        let inner_bytes: usize =
            dims[axis + 1..].iter().product::<usize>() * x.dtype().size_bytes();

        let (inputs, outputs, _sched) = ctx.split();
        let src = inputs[0].as_bytes();
        for (j, out) in outputs.iter_mut().enumerate() {
            let dst = out.as_bytes_mut();
            for o in 0..outer {
                let s = ((o * num) + j) * inner_bytes;
                dst[o * inner_bytes..(o + 1) * inner_bytes]
                    .copy_from_slice(&src[s..s + inner_bytes]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_api::KernelStatus;
    use tensor_core::{DType, Shape, Tensor};

    use crate::testutil::sched;

    #[test]
    fn test_unpack_rows() {
        let sched = sched();
        let x = Tensor::from_slice(Shape::new(vec![2, 3]), &[1i32, 2, 3, 4, 5, 6]).unwrap();
        let mut a = Tensor::zeros(Shape::vector(3), DType::I32);
        let mut b = Tensor::zeros(Shape::vector(3), DType::I32);
        let mut ctx = KernelContext::build(OP)
            .input(&x)
            .output(&mut a)
            .output(&mut b)
            .attr("num", 2i64)
            .attr("axis", 0i64)
            .finish(&sched);
        UnpackKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(a.as_slice::<i32>().unwrap(), &[1, 2, 3]);
        assert_eq!(b.as_slice::<i32>().unwrap(), &[4, 5, 6]);
    }

    #[test]
    fn test_unpack_columns() {
        let sched = sched();
        let x = Tensor::from_slice(Shape::new(vec![2, 3]), &[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let mut outs: Vec<Tensor> = (0..3)
            .map(|_| Tensor::zeros(Shape::vector(2), DType::F32))
            .collect();
        let mut it = outs.iter_mut();
        let (a, b, c) = (it.next().unwrap(), it.next().unwrap(), it.next().unwrap());
        let mut ctx = KernelContext::build(OP)
            .input(&x)
            .output(a)
            .output(b)
            .output(c)
            .attr("num", 3i64)
            .attr("axis", 1i64)
            .finish(&sched);
        UnpackKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(outs[0].as_slice::<f32>().unwrap(), &[1.0, 4.0]);
        assert_eq!(outs[1].as_slice::<f32>().unwrap(), &[2.0, 5.0]);
        assert_eq!(outs[2].as_slice::<f32>().unwrap(), &[3.0, 6.0]);
    }

    #[test]
    fn test_negative_axis() {
        let sched = sched();
        let x = Tensor::from_slice(Shape::new(vec![1, 2]), &[7i64, 8]).unwrap();
        let mut a = Tensor::zeros(Shape::vector(1), DType::I64);
        let mut b = Tensor::zeros(Shape::vector(1), DType::I64);
        let mut ctx = KernelContext::build(OP)
            .input(&x)
            .output(&mut a)
            .output(&mut b)
            .attr("num", 2i64)
            .attr("axis", -1i64)
            .finish(&sched);
        UnpackKernel.compute(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(a.as_slice::<i64>().unwrap(), &[7]);
        assert_eq!(b.as_slice::<i64>().unwrap(), &[8]);
    }

    #[test]
    fn test_num_mismatch_rejected() {
        let sched = sched();
        let x = Tensor::from_slice(Shape::new(vec![2, 3]), &[1i32, 2, 3, 4, 5, 6]).unwrap();
        let mut a = Tensor::zeros(Shape::vector(3), DType::I32);
        let mut ctx = KernelContext::build(OP)
            .input(&x)
            .output(&mut a)
            .attr("num", 1i64)
            .attr("axis", 0i64)
            .finish(&sched);
        let err = UnpackKernel.compute(&mut ctx).unwrap_err();
        assert_eq!(err.status(), KernelStatus::ParamInvalid);
        assert!(err.to_string().contains("does not match num"));
    }

    #[test]
    fn test_arity_checked_against_num() {
        let sched = sched();
        let x = Tensor::from_slice(Shape::new(vec![2, 2]), &[1i32, 2, 3, 4]).unwrap();
        let mut a = Tensor::zeros(Shape::vector(2), DType::I32);
        let mut ctx = KernelContext::build(OP)
            .input(&x)
            .output(&mut a)
            .attr("num", 2i64)
            .attr("axis", 0i64)
            .finish(&sched);
        let err = UnpackKernel.compute(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("expected 2 outputs"));
    }
}
