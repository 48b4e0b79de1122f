// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # op-kernels
//!
//! The built-in CPU operator kernels and the registry bootstrap.
//!
//! Every operator is a thin body over the shared machinery: arity and
//! attribute validation from `kernel-api`, broadcasting from
//! `tensor-core`, sharded loops from `compute-sched`, and the dtype
//! dispatch macro in this crate. [`builtin_registry`] wires all of them
//! into a [`KernelRegistry`] for the host runtime.

mod dispatch;
mod elementwise;
pub mod ops;

pub use ops::{
    AddKernel, CastKernel, GatherV2Kernel, IdentityKernel, MulKernel, PadDKernel, RealDivKernel,
    ScatterElementsKernel, SubKernel, UnpackKernel, UnsortedSegmentSumKernel,
};

use kernel_api::KernelRegistry;

/// Builds the registry of built-in kernels. Called once at startup by
/// the host runtime; there is no static-initialisation registration.
pub fn builtin_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();
    registry.register(Box::new(ops::AddKernel));
    registry.register(Box::new(ops::SubKernel));
    registry.register(Box::new(ops::MulKernel));
    registry.register(Box::new(ops::RealDivKernel));
    registry.register(Box::new(ops::IdentityKernel));
    registry.register(Box::new(ops::CastKernel));
    registry.register(Box::new(ops::GatherV2Kernel));
    registry.register(Box::new(ops::PadDKernel));
    registry.register(Box::new(ops::ScatterElementsKernel));
    registry.register(Box::new(ops::UnpackKernel));
    registry.register(Box::new(ops::UnsortedSegmentSumKernel));
    tracing::debug!("built-in registry holds {} kernels", registry.len());
    registry
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = builtin_registry();
        assert_eq!(
            registry.names(),
            vec![
                "Add",
                "Cast",
                "GatherV2",
                "Identity",
                "Mul",
                "PadD",
                "RealDiv",
                "ScatterElements",
                "Sub",
                "Unpack",
                "UnsortedSegmentSum",
            ]
        );
    }
}
