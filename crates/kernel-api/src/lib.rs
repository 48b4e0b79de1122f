// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kernel-api
//!
//! The contract between the surrounding graph-execution runtime and the
//! operator kernels:
//!
//! - [`KernelContext`] — inputs, outputs, typed attributes, and the shared
//!   worker pool for one invocation.
//! - [`CpuKernel`] — the single `compute` entry point every operator
//!   implements, plus [`check_io`] arity validation.
//! - [`KernelRegistry`] — the explicit name → kernel map.
//! - [`KernelStatus`]/[`KernelError`] — the status-code-only error channel
//!   crossing the kernel boundary.

mod attr;
mod context;
mod error;
mod kernel;
mod registry;

pub use attr::AttrValue;
pub use context::{KernelContext, KernelContextBuilder};
pub use error::{KernelError, KernelStatus};
pub use kernel::{check_io, CpuKernel};
pub use registry::KernelRegistry;
