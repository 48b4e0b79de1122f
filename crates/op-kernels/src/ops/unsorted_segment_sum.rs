// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! UnsortedSegmentSum: segment-wise accumulation.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};
use num_complex::Complex;

use crate::dispatch::dispatch_dtype;
use crate::elementwise::{ArithElement, MIN_SHARD_ELEMS};
use crate::ops::read_index_vec;

const OP: &str = "UnsortedSegmentSum";

/// Sums rows of `data` into segments.
///
/// `segment_ids` covers the leading dimensions of `data`; row `i` (the
/// trailing-dimension slice at position `i`) is added into output
/// segment `segment_ids[i]`. Segments nobody maps to stay zero. A
/// negative segment id drops its row; an id at or beyond `num_segments`
/// is `ParamInvalid`, rejected before any write.
pub struct UnsortedSegmentSumKernel;

impl CpuKernel for UnsortedSegmentSumKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 3, 1)?;
        let data = ctx.input(0)?;
        let ids_t = ctx.input(1)?;
        let num_seg_t = ctx.input(2)?;
        let out = ctx.output(0)?;

        if num_seg_t.num_elements() != 1 {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "num_segments must hold one element, got shape {}",
                    num_seg_t.shape()
                ),
            ));
        }
        let num_segments = read_index_vec(OP, num_seg_t)?[0];
        if num_segments < 0 {
            return Err(KernelError::param_invalid(
                OP,
                format!("num_segments must be non-negative, got {num_segments}"),
            ));
        }
        let num_segments = num_segments as usize;

        let dims = data.shape().dims().to_vec();
        let seg_rank = ids_t.shape().rank();
        if seg_rank > dims.len() || ids_t.shape().dims() != &dims[..seg_rank] {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "segment_ids shape {} does not prefix data shape {}",
                    ids_t.shape(),
                    data.shape()
                ),
            ));
        }

        let mut expect = vec![num_segments];
        expect.extend_from_slice(&dims[seg_rank..]);
        if out.shape().dims() != expect {
            return Err(KernelError::param_invalid(
                OP,
                format!("output shape {} does not match segment layout", out.shape()),
            ));
        }
        if out.dtype() != data.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                format!(
                    "output dtype {} does not match data dtype {}",
                    out.dtype(),
                    data.dtype()
                ),
            ));
        }
        let ids = read_index_vec(OP, ids_t)?;
        for &id in &ids {
            if id >= num_segments as i64 {
                return Err(KernelError::param_invalid(
                    OP,
                    format!("segment id {id} exceeds num_segments {num_segments}"),
                ));
            }
        }
        let inner: usize = dims[seg_rank..].iter().product();

        dispatch_dtype!(OP, data.dtype(), run(ctx, &ids, inner), {
            I8 => i8, I16 => i16, I32 => i32, I64 => i64,
            U8 => u8, U16 => u16, U32 => u32, U64 => u64,
            F16 => half::f16, F32 => f32, F64 => f64,
            Complex64 => Complex<f32>, Complex128 => Complex<f64>,
        })
    }
}

fn run<T: ArithElement>(
    ctx: &mut KernelContext<'_>,
    ids: &[i64],
    inner: usize,
) -> Result<(), KernelError> {
    let (inputs, outputs, sched) = ctx.split();
    let src = inputs[0].as_slice::<T>()?;
    let dst = outputs[0].as_slice_mut::<T>()?;

    sched.run_over(dst, MIN_SHARD_ELEMS, |_, chunk| {
        for v in chunk.iter_mut() {
            *v = T::zero();
        }
        Ok::<(), KernelError>(())
    })?;

    // Accumulation runs sequentially: distinct rows may target the same
    // segment, so the writes are not disjoint.
    for (i, &id) in ids.iter().enumerate() {
        if id < 0 {
            continue;
        }
        let seg = id as usize;
        for k in 0..inner {
            dst[seg * inner + k] = dst[seg * inner + k].add_elem(src[i * inner + k]);
        }
    }
    Ok(())
}
