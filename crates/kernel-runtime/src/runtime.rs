// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The execution facade: registry lookup, invocation, status folding.

use std::sync::Mutex;
use std::time::Instant;

use compute_sched::SchedPool;
use kernel_api::{KernelContext, KernelRegistry, KernelStatus};

use crate::{OpMetrics, RuntimeConfig, RuntimeError};

/// Owns the long-lived pieces of kernel execution: the worker pool, the
/// kernel registry, and the metrics accumulator.
///
/// Construction is the explicit startup routine — the registry is
/// populated here, once, not by static-initialisation side effects.
/// `execute` is the sole entry point; errors never cross it as Rust
/// errors but are folded into a [`KernelStatus`], matching what a
/// graph-executor host expects from an operator boundary.
pub struct KernelRuntime {
    config: RuntimeConfig,
    sched: SchedPool,
    registry: KernelRegistry,
    metrics: Mutex<OpMetrics>,
}

impl KernelRuntime {
    /// Builds a runtime with the built-in kernels.
    ///
    /// # Errors
    /// [`RuntimeError::SchedError`] if the worker pool cannot be built.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        Self::with_registry(config, op_kernels::builtin_registry())
    }

    /// Builds a runtime around a caller-assembled registry, for hosts
    /// that add their own kernels next to (or instead of) the built-ins.
    pub fn with_registry(
        config: RuntimeConfig,
        registry: KernelRegistry,
    ) -> Result<Self, RuntimeError> {
        let sched = SchedPool::new(config.num_threads)?;
        tracing::info!(
            workers = sched.workers(),
            kernels = registry.len(),
            "kernel runtime ready"
        );
        Ok(Self {
            config,
            sched,
            registry,
            metrics: Mutex::new(OpMetrics::new()),
        })
    }

    /// Returns the shared worker pool, for building [`KernelContext`]s.
    pub fn sched(&self) -> &SchedPool {
        &self.sched
    }

    /// Returns the kernel registry.
    pub fn registry(&self) -> &KernelRegistry {
        &self.registry
    }

    /// Returns a snapshot of the per-operator metrics.
    pub fn metrics(&self) -> OpMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Looks up the kernel named by the context's op type and runs it.
    ///
    /// The result is a status code, not a Rust error: `ParamInvalid`
    /// for malformed caller input (including an unregistered op type),
    /// `InnerError` for internal failures. The error detail is logged
    /// here, at the boundary where it leaves the typed world.
    pub fn execute(&self, ctx: &mut KernelContext<'_>) -> KernelStatus {
        let op = ctx.op_type().to_string();
        let Some(kernel) = self.registry.get(&op) else {
            tracing::error!(op = %op, "no kernel registered");
            return KernelStatus::ParamInvalid;
        };

        let started = Instant::now();
        let status = match kernel.compute(ctx) {
            Ok(()) => KernelStatus::Ok,
            Err(e) => {
                tracing::error!(op = %op, error = %e, "kernel failed");
                e.status()
            }
        };
        if self.config.enable_profiling {
            self.metrics
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .record(&op, started.elapsed(), status == KernelStatus::Ok);
        }
        status
    }
}

impl std::fmt::Debug for KernelRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelRuntime")
            .field("config", &self.config)
            .field("workers", &self.sched.workers())
            .field("kernels", &self.registry.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{DType, Shape, Tensor};

    fn runtime() -> KernelRuntime {
        KernelRuntime::new(RuntimeConfig {
            num_threads: Some(2),
            enable_profiling: true,
        })
        .unwrap()
    }

    #[test]
    fn test_execute_known_op() {
        let rt = runtime();
        let x = Tensor::from_slice(Shape::vector(2), &[1i32, 2]).unwrap();
        let mut y = Tensor::zeros(Shape::vector(2), DType::I32);
        let mut ctx = KernelContext::build("Identity")
            .input(&x)
            .output(&mut y)
            .finish(rt.sched());
        assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
        drop(ctx);
        assert_eq!(y, x);
    }

    #[test]
    fn test_unknown_op_is_param_invalid() {
        let rt = runtime();
        let mut ctx = KernelContext::build("NoSuchOp").finish(rt.sched());
        assert_eq!(rt.execute(&mut ctx), KernelStatus::ParamInvalid);
    }

    #[test]
    fn test_metrics_count_successes_and_failures() {
        let rt = runtime();
        let x = Tensor::from_slice(Shape::vector(2), &[1i32, 2]).unwrap();
        let mut y = Tensor::zeros(Shape::vector(2), DType::I32);
        let mut ctx = KernelContext::build("Identity")
            .input(&x)
            .output(&mut y)
            .finish(rt.sched());
        assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
        drop(ctx);

        // Missing output: the kernel rejects it.
        let mut ctx = KernelContext::build("Identity").input(&x).finish(rt.sched());
        assert_eq!(rt.execute(&mut ctx), KernelStatus::ParamInvalid);

        let m = rt.metrics();
        let stats = m.stats("Identity").unwrap();
        assert_eq!(stats.invocations, 2);
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn test_profiling_disabled_records_nothing() {
        let rt = KernelRuntime::new(RuntimeConfig {
            num_threads: Some(1),
            enable_profiling: false,
        })
        .unwrap();
        let x = Tensor::from_slice(Shape::vector(1), &[1i32]).unwrap();
        let mut y = Tensor::zeros(Shape::vector(1), DType::I32);
        let mut ctx = KernelContext::build("Identity")
            .input(&x)
            .output(&mut y)
            .finish(rt.sched());
        rt.execute(&mut ctx);
        drop(ctx);
        assert_eq!(rt.metrics().total_invocations(), 0);
    }
}
