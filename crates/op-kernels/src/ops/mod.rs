// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The built-in operator kernels, one module per operator.

mod add;
mod cast;
mod gather_v2;
mod identity;
mod mul;
mod pad_d;
mod real_div;
mod scatter_elements;
mod sub;
mod unpack;
mod unsorted_segment_sum;

pub use add::AddKernel;
pub use cast::CastKernel;
pub use gather_v2::GatherV2Kernel;
pub use identity::IdentityKernel;
pub use mul::MulKernel;
pub use pad_d::PadDKernel;
pub use real_div::RealDivKernel;
pub use scatter_elements::ScatterElementsKernel;
pub use sub::SubKernel;
pub use unpack::UnpackKernel;
pub use unsorted_segment_sum::UnsortedSegmentSumKernel;

use kernel_api::KernelError;
use tensor_core::{DType, Tensor};

/// Reads an index tensor (i32 or i64) into a flat `i64` vector.
pub(crate) fn read_index_vec(op: &str, t: &Tensor) -> Result<Vec<i64>, KernelError> {
    match t.dtype() {
        DType::I32 => Ok(t.as_slice::<i32>()?.iter().map(|&v| i64::from(v)).collect()),
        DType::I64 => Ok(t.as_slice::<i64>()?.to_vec()),
        other => Err(KernelError::param_invalid(
            op,
            format!("indices must be i32 or i64, got {other}"),
        )),
    }
}

/// Resolves a possibly-negative axis attribute against `rank`.
///
/// # Errors
/// `ParamInvalid` unless `-rank <= axis < rank`.
pub(crate) fn normalize_axis(op: &str, axis: i64, rank: usize) -> Result<usize, KernelError> {
    let r = rank as i64;
    if axis < -r || axis >= r {
        return Err(KernelError::param_invalid(
            op,
            format!("axis {axis} out of range for rank {rank}"),
        ));
    }
    Ok(if axis < 0 { (axis + r) as usize } else { axis as usize })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::Shape;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis("T", 0, 3).unwrap(), 0);
        assert_eq!(normalize_axis("T", 2, 3).unwrap(), 2);
        assert_eq!(normalize_axis("T", -1, 3).unwrap(), 2);
        assert_eq!(normalize_axis("T", -3, 3).unwrap(), 0);
        assert!(normalize_axis("T", 3, 3).is_err());
        assert!(normalize_axis("T", -4, 3).is_err());
        assert!(normalize_axis("T", 0, 0).is_err());
    }

    #[test]
    fn test_read_index_vec_widens_i32() {
        let t = Tensor::from_slice(Shape::vector(3), &[1i32, -2, 3]).unwrap();
        assert_eq!(read_index_vec("T", &t).unwrap(), vec![1, -2, 3]);
        let t = Tensor::from_slice(Shape::vector(2), &[7i64, 8]).unwrap();
        assert_eq!(read_index_vec("T", &t).unwrap(), vec![7, 8]);
        let t = Tensor::from_slice(Shape::vector(1), &[1.0f32]).unwrap();
        assert!(read_index_vec("T", &t).is_err());
    }
}
