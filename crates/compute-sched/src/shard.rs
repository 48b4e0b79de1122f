// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Linear index-range sharding.
//!
//! Purely algorithmic — no threads, no I/O — which keeps the chunking
//! rules trivially unit-testable and amenable to property-based testing.
//! [`crate::SchedPool`] layers the actual parallelism on top.

/// Splits `[0, total)` into contiguous half-open chunks.
///
/// Rules:
/// - `total == 0` produces no chunks.
/// - `per_unit >= total` produces exactly one chunk covering the range,
///   so tiny workloads never pay pool-submission overhead.
/// - Otherwise every chunk holds at least `per_unit.max(1)` indices
///   (except possibly the last), and the chunk count never exceeds
///   `workers`, so each worker gets at most one chunk per call.
///
/// The union of the returned ranges is exactly `[0, total)` with no gaps
/// and no overlaps.
pub fn shard_ranges(total: usize, per_unit: usize, workers: usize) -> Vec<(usize, usize)> {
    if total == 0 {
        return Vec::new();
    }
    let per_unit = per_unit.max(1);
    if per_unit >= total {
        return vec![(0, total)];
    }
    let chunk = per_unit.max(total.div_ceil(workers.max(1)));
    let mut ranges = Vec::with_capacity(total.div_ceil(chunk));
    let mut start = 0;
    while start < total {
        let end = (start + chunk).min(total);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Returns the chunk length `shard_ranges` uses for a non-degenerate
/// split; every range except possibly the last has exactly this length.
pub(crate) fn chunk_len(total: usize, per_unit: usize, workers: usize) -> usize {
    per_unit.max(1).max(total.div_ceil(workers.max(1)))
}
