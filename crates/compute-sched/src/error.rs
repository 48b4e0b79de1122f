// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the scheduling layer.

/// Errors raised while constructing the worker pool.
///
/// Work-callback failures are not wrapped here: [`crate::SchedPool::run`]
/// is generic over the caller's error type and propagates it unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    /// The underlying thread pool could not be built.
    #[error("worker pool construction failed: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}
