// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-operator execution metrics.
//!
//! [`OpMetrics`] aggregates invocation counts and wall-clock compute
//! time per operation type. Collection is gated by
//! `RuntimeConfig::enable_profiling`.

use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregated statistics for one operation type.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct OpStats {
    /// Number of `compute` calls, successful or not.
    pub invocations: u64,
    /// Number of calls that returned a non-OK status.
    pub failures: u64,
    /// Total wall-clock time spent inside `compute`.
    pub total_duration: Duration,
}

/// Metrics for all operators executed through one runtime.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct OpMetrics {
    ops: BTreeMap<String, OpStats>,
}

impl OpMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one kernel invocation.
    pub fn record(&mut self, op: &str, duration: Duration, ok: bool) {
        let stats = self.ops.entry(op.to_string()).or_default();
        stats.invocations += 1;
        if !ok {
            stats.failures += 1;
        }
        stats.total_duration += duration;
    }

    /// Returns the statistics for `op`, if it ever ran.
    pub fn stats(&self, op: &str) -> Option<&OpStats> {
        self.ops.get(op)
    }

    /// Total invocations across all operators.
    pub fn total_invocations(&self) -> u64 {
        self.ops.values().map(|s| s.invocations).sum()
    }

    /// Returns a human-readable summary suitable for CLI output, one
    /// line per operator in name order.
    pub fn summary(&self) -> String {
        let mut lines = Vec::with_capacity(self.ops.len());
        for (name, s) in &self.ops {
            lines.push(format!(
                "{name}: {} calls, {} failed, {:.3}ms total",
                s.invocations,
                s.failures,
                s.total_duration.as_secs_f64() * 1000.0,
            ));
        }
        lines.join("\n")
    }
}
