// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The name → kernel registry.
//!
//! The registry is an explicit, constructed-once object populated by a
//! startup routine (see `op_kernels::builtin_registry`); registration does
//! not rely on static-initialisation side effects. Lookup-and-invoke
//! through the registry is the sole execution entry point the surrounding
//! runtime uses.

use std::collections::BTreeMap;

use crate::CpuKernel;

/// Maps operation-type strings to kernel instances.
pub struct KernelRegistry {
    kernels: BTreeMap<String, Box<dyn CpuKernel>>,
}

impl KernelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            kernels: BTreeMap::new(),
        }
    }

    /// Registers a kernel under its own name. Re-registering a name
    /// replaces the previous kernel (last one wins) with a warning.
    pub fn register(&mut self, kernel: Box<dyn CpuKernel>) {
        let name = kernel.name().to_string();
        if self.kernels.insert(name.clone(), kernel).is_some() {
            tracing::warn!("kernel '{name}' registered twice; keeping the last one");
        } else {
            tracing::debug!("registered kernel '{name}'");
        }
    }

    /// Looks up the kernel registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn CpuKernel> {
        self.kernels.get(name).map(|k| k.as_ref())
    }

    /// Returns all registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.kernels.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered kernels.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Returns `true` if no kernel is registered.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KernelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelRegistry")
            .field("kernels", &self.names())
            .finish()
    }
}
