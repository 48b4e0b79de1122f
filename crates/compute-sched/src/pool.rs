// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fixed-size worker pool backing every kernel's parallel loop.
//!
//! One [`SchedPool`] is built when the execution context is constructed
//! and reused for every `compute` call; no threads are spawned per call.
//! Both entry points block until all dispatched chunks have completed
//! (barrier semantics): a kernel never observes partial completion, and
//! on failure the first error is propagated only after the join. Output
//! written by other chunks before the failing one is not rolled back.

use rayon::prelude::*;

use crate::shard::{chunk_len, shard_ranges};
use crate::SchedError;

/// A fixed-size worker-thread pool with sharded parallel-for entry points.
pub struct SchedPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl SchedPool {
    /// Builds a pool with `num_threads` workers, defaulting to the number
    /// of online CPU cores when `None`.
    ///
    /// # Errors
    /// Returns [`SchedError::PoolBuild`] if the worker threads cannot be
    /// spawned.
    pub fn new(num_threads: Option<usize>) -> Result<Self, SchedError> {
        let workers = num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        });
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("opkernel-worker-{i}"))
            .build()?;
        tracing::debug!("sched pool ready with {workers} workers");
        Ok(Self { pool, workers })
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Invokes `work(start, end)` over contiguous chunks of `[0, total)`,
    /// each at least `per_unit` indices long except possibly the last.
    ///
    /// `total == 0` returns `Ok` without invoking `work`. A single-chunk
    /// split runs inline on the calling thread. Chunks may execute in any
    /// order and concurrently; `work` must only touch state belonging to
    /// its own `[start, end)` slice. All chunks are joined before the
    /// first error (if any) is returned.
    pub fn run<E, F>(&self, total: usize, per_unit: usize, work: F) -> Result<(), E>
    where
        E: Send,
        F: Fn(usize, usize) -> Result<(), E> + Sync,
    {
        let ranges = shard_ranges(total, per_unit, self.workers);
        match ranges.len() {
            0 => Ok(()),
            1 => work(ranges[0].0, ranges[0].1),
            _ => self.pool.install(|| {
                ranges
                    .par_iter()
                    .map(|&(start, end)| work(start, end))
                    .reduce(|| Ok(()), |a, b| a.and(b))
            }),
        }
    }

    /// Shards a mutable output slice into disjoint chunks and invokes
    /// `work(start, chunk)` once per chunk, where `start` is the chunk's
    /// offset into `out`.
    ///
    /// This is the writer-side companion of [`run`](SchedPool::run): the
    /// borrow splitting makes the disjoint-write contract structural
    /// instead of a convention the callback has to uphold.
    pub fn run_over<T, E, F>(&self, out: &mut [T], per_unit: usize, work: F) -> Result<(), E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut [T]) -> Result<(), E> + Sync,
    {
        let total = out.len();
        if total == 0 {
            return Ok(());
        }
        if per_unit.max(1) >= total {
            return work(0, out);
        }
        let chunk = chunk_len(total, per_unit, self.workers);
        self.pool.install(|| {
            out.par_chunks_mut(chunk)
                .enumerate()
                .map(|(i, slice)| work(i * chunk, slice))
                .reduce(|| Ok(()), |a, b| a.and(b))
        })
    }
}

impl std::fmt::Debug for SchedPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedPool")
            .field("workers", &self.workers)
            .finish()
    }
}
