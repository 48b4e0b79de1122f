// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor and shape operations.

use crate::{DType, Shape};

/// Errors that can occur when constructing or accessing tensors.
///
/// Every variant is a caller-input problem; the kernel layer maps them all
/// onto its `ParamInvalid` status code.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer size does not match `shape × element width`.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Typed access with the wrong element type for this tensor.
    #[error("dtype mismatch: tensor holds {held}, access requested {requested}")]
    DTypeMismatch { held: DType, requested: DType },

    /// A dimension index past the shape's rank.
    #[error("dimension index {index} out of range for rank {rank}")]
    IndexOutOfRange { index: usize, rank: usize },

    /// Two shapes violate the equal-or-one broadcast rule.
    #[error("shapes {lhs} and {rhs} are not broadcast-compatible at dimension {dim}")]
    BroadcastIncompatible { lhs: Shape, rhs: Shape, dim: usize },
}
