// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Identity: a shape- and dtype-preserving copy.

use kernel_api::{check_io, CpuKernel, KernelContext, KernelError};

use crate::elementwise::copy_bytes;

const OP: &str = "Identity";

/// Copies the input into the output bit for bit. Works for every dtype
/// since no value is interpreted.
pub struct IdentityKernel;

impl CpuKernel for IdentityKernel {
    fn name(&self) -> &str {
        OP
    }

    fn compute(&self, ctx: &mut KernelContext<'_>) -> Result<(), KernelError> {
        check_io(ctx, 1, 1)?;
        let x = ctx.input(0)?;
        let out = ctx.output(0)?;
        if out.dtype() != x.dtype() {
            return Err(KernelError::param_invalid(
                OP,
                format!("output dtype {} does not match input {}", out.dtype(), x.dtype()),
            ));
        }
        if out.shape() != x.shape() {
            return Err(KernelError::param_invalid(
                OP,
                format!("output shape {} does not match input {}", out.shape(), x.shape()),
            ));
        }
        let (inputs, outputs, _sched) = ctx.split();
        copy_bytes(OP, &mut *outputs[0], inputs[0])
    }
}
