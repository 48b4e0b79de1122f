// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the execution facade.

/// Errors that can occur while building or configuring the runtime.
///
/// Kernel invocation failures never surface here: `execute` folds them
/// into a [`kernel_api::KernelStatus`] at the operator boundary.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The worker pool could not be constructed.
    #[error("scheduler error: {0}")]
    SchedError(#[from] compute_sched::SchedError),
}
