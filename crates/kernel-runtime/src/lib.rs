// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kernel-runtime
//!
//! The execution facade over the operator library.
//!
//! A [`KernelRuntime`] owns one worker pool and one kernel registry for
//! its whole lifetime. The host builds a [`kernel_api::KernelContext`]
//! per operator invocation and hands it to [`KernelRuntime::execute`],
//! which returns a [`kernel_api::KernelStatus`] — the only error
//! currency crossing the operator boundary.

mod config;
mod error;
mod metrics;
mod runtime;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use metrics::{OpMetrics, OpStats};
pub use runtime::KernelRuntime;
