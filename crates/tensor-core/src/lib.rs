// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Tensor, shape, dtype, and broadcasting primitives shared by every
//! operator kernel in opkernel-rt.
//!
//! This crate provides:
//! - [`Shape`] — immutable dimension descriptors with stride helpers.
//! - [`DType`] — the closed set of element type tags, plus the
//!   [`Element`]/[`RealElement`] traits bridging tags to Rust types.
//! - [`Tensor`] — a host-allocated, contiguous, row-major buffer with
//!   tag-checked typed access. Kernels never allocate or free tensor
//!   memory.
//! - [`BcastSpec`] — the NumPy-rule broadcasting engine producing
//!   stride-0 replay descriptors for the compute loops.
//!
//! # Design Goals
//! - No heap allocation in compute loops (plans are built once per call).
//! - Unsupported or mismatched dtypes surface as errors, never panics.
//! - Clean error types via `thiserror`.

mod bcast;
mod dtype;
mod error;
mod shape;
mod tensor;

pub use bcast::BcastSpec;
pub use dtype::{DType, Element, RealElement};
pub use error::TensorError;
pub use shape::Shape;
pub use tensor::Tensor;
