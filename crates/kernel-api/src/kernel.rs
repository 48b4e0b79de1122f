// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The kernel trait and the shared first-line validation.

use crate::{KernelContext, KernelError};

/// A single operator's compute implementation.
///
/// Every kernel exposes one entry point; an invocation flows
/// validate → dispatch → compute and ends in success or a terminal
/// failure. There is no retry inside the kernel — the caller decides
/// whether to re-invoke the whole operator.
///
/// Kernels are stateless and shared across calls, hence `Send + Sync`.
pub trait CpuKernel: Send + Sync {
    /// The registration name, e.g. `"Add"` or `"GatherV2"`.
    fn name(&self) -> &str;

    /// Runs the operator against the given context.
    ///
    /// # Errors
    /// `ParamInvalid` for malformed caller input (detected before any
    /// output write), `Inner` for internal failures (output may be
    /// partially written).
    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError>;
}

/// Validates input/output arity before any type-specific logic runs.
///
/// This is the first line of defense every kernel calls at the top of
/// `compute`. The null-pointer class of failures from looser runtimes is
/// unrepresentable here — a `&Tensor` always points at a live tensor — so
/// arity is what is left to check.
///
/// # Errors
/// `ParamInvalid` naming the expected and actual counts.
pub fn check_io(ctx: &KernelContext<'_>, n_in: usize, n_out: usize) -> Result<(), KernelError> {
    if ctx.num_inputs() != n_in {
        return Err(KernelError::param_invalid(
            ctx.op_type(),
            format!("expected {n_in} inputs, got {}", ctx.num_inputs()),
        ));
    }
    if ctx.num_outputs() != n_out {
        return Err(KernelError::param_invalid(
            ctx.op_type(),
            format!("expected {n_out} outputs, got {}", ctx.num_outputs()),
        ));
    }
    Ok(())
}
