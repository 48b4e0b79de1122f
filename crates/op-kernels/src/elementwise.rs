// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The shared compute loop behind the binary elementwise operators.
//!
//! Add, Sub, Mul and RealDiv differ only in the scalar lambda they hand
//! to [`binary_elementwise`]; everything else — arity and dtype checks,
//! the broadcast plan, output-shape validation, sharding across the
//! worker pool — lives here once.

use kernel_api::{check_io, KernelContext, KernelError};
use tensor_core::{BcastSpec, DType, Element, Tensor};

/// Minimum number of output elements a single worker chunk processes.
/// Workloads below this run inline on the calling thread.
pub(crate) const MIN_SHARD_ELEMS: usize = 1024;

/// Validates the shared preconditions of a two-input, one-output
/// elementwise operator and returns the common dtype: both inputs and
/// the output must carry the same tag (no implicit promotion).
pub(crate) fn binary_prologue(ctx: &KernelContext<'_>) -> Result<DType, KernelError> {
    check_io(ctx, 2, 1)?;
    let x1 = ctx.input(0)?;
    let x2 = ctx.input(1)?;
    let out = ctx.output(0)?;
    if x1.dtype() != x2.dtype() {
        return Err(KernelError::param_invalid(
            ctx.op_type(),
            format!(
                "input dtypes differ: x1 is {}, x2 is {}",
                x1.dtype(),
                x2.dtype()
            ),
        ));
    }
    if out.dtype() != x1.dtype() {
        return Err(KernelError::param_invalid(
            ctx.op_type(),
            format!(
                "output dtype {} does not match input dtype {}",
                out.dtype(),
                x1.dtype()
            ),
        ));
    }
    Ok(x1.dtype())
}

/// Runs `out[i] = f(x1[j], x2[k])` under the broadcast mapping, sharded
/// over the context's worker pool.
///
/// The output tensor must already have the broadcast shape; a mismatch
/// is `ParamInvalid` and the output is left untouched. When both inputs
/// already have the output shape the loop skips the index mapping
/// entirely.
pub(crate) fn binary_elementwise<T, F>(
    op: &str,
    ctx: &mut KernelContext<'_>,
    f: F,
) -> Result<(), KernelError>
where
    T: Element,
    F: Fn(T, T) -> T + Sync,
{
    let (inputs, outputs, sched) = ctx.split();
    let spec = BcastSpec::compute(&[inputs[0].shape(), inputs[1].shape()])?;
    if outputs[0].shape().dims() != spec.out_dims() {
        return Err(KernelError::param_invalid(
            op,
            format!(
                "output shape {} does not match broadcast shape {}",
                outputs[0].shape(),
                spec.out_shape()
            ),
        ));
    }

    let a = inputs[0].as_slice::<T>()?;
    let b = inputs[1].as_slice::<T>()?;
    let dst = outputs[0].as_slice_mut::<T>()?;

    if spec.is_identity(0) && spec.is_identity(1) {
        sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
            for (k, d) in chunk.iter_mut().enumerate() {
                let lin = start + k;
                *d = f(a[lin], b[lin]);
            }
            Ok::<(), KernelError>(())
        })
    } else {
        sched.run_over(dst, MIN_SHARD_ELEMS, |start, chunk| {
            for (k, d) in chunk.iter_mut().enumerate() {
                let lin = start + k;
                *d = f(a[spec.src_index(0, lin)], b[spec.src_index(1, lin)]);
            }
            Ok::<(), KernelError>(())
        })
    }
}

/// Arithmetic as the elementwise operators define it: integers wrap on
/// overflow (two's complement, matching the fixed-width tensor dtypes),
/// floats and complex use IEEE semantics. One trait keeps Add, Sub and
/// Mul monomorphic over the full dtype set.
pub(crate) trait ArithElement: Element {
    fn add_elem(self, rhs: Self) -> Self;
    fn sub_elem(self, rhs: Self) -> Self;
    fn mul_elem(self, rhs: Self) -> Self;
}

macro_rules! arith_wrapping {
    ($($ty:ty),+) => {
        $(impl ArithElement for $ty {
            fn add_elem(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            fn sub_elem(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            fn mul_elem(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
        })+
    };
}

macro_rules! arith_plain {
    ($($ty:ty),+) => {
        $(impl ArithElement for $ty {
            fn add_elem(self, rhs: Self) -> Self { self + rhs }
            fn sub_elem(self, rhs: Self) -> Self { self - rhs }
            fn mul_elem(self, rhs: Self) -> Self { self * rhs }
        })+
    };
}

arith_wrapping!(i8, i16, i32, i64, u8, u16, u32, u64);
arith_plain!(half::f16, f32, f64);
arith_plain!(num_complex::Complex<f32>, num_complex::Complex<f64>);

/// Copies `src` into `dst` byte for byte. Shape and dtype agreement is
/// the caller's responsibility; a byte-length mismatch at this point is
/// an internal inconsistency, not a caller error.
pub(crate) fn copy_bytes(op: &str, dst: &mut Tensor, src: &Tensor) -> Result<(), KernelError> {
    let s = src.as_bytes();
    let d = dst.as_bytes_mut();
    if d.len() != s.len() {
        return Err(KernelError::inner(
            op,
            format!("copy of {} bytes into a {}-byte buffer", s.len(), d.len()),
        ));
    }
    d.copy_from_slice(s);
    Ok(())
}
