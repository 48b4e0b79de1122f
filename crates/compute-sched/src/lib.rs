// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # compute-sched
//!
//! The parallel-for engine shared by every operator kernel.
//!
//! A [`SchedPool`] wraps a fixed-size worker pool built once per execution
//! context. Kernels hand it a total element count and a minimum per-chunk
//! size; it shards the linear index space into contiguous disjoint ranges,
//! runs the chunks concurrently, and blocks until all of them have joined.
//! There is no cancellation and no ordering between chunks — a kernel that
//! needs a cross-chunk reduction performs it after the join.

mod error;
mod pool;
mod shard;

pub use error::SchedError;
pub use pool::SchedPool;
pub use shard::shard_ranges;
