// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `opk bench` command: time one operator on a synthetic workload.
//!
//! This is a quick on-device measurement tool; the statistically
//! careful benchmarks live in the criterion suite of `op-kernels`.

use std::time::Instant;

use anyhow::bail;
use kernel_api::{KernelContext, KernelStatus};
use kernel_runtime::{KernelRuntime, RuntimeConfig};
use tensor_core::{DType, Shape, Tensor};

pub fn execute(
    config: RuntimeConfig,
    op: String,
    elems: usize,
    iters: usize,
) -> anyhow::Result<()> {
    let rt = KernelRuntime::new(config)?;
    if rt.registry().get(&op).is_none() {
        bail!(
            "unknown op '{op}'; registered: {}",
            rt.registry().names().join(", ")
        );
    }

    let data: Vec<f32> = (0..elems).map(|i| (i % 97) as f32 + 1.0).collect();
    let x1 = Tensor::from_slice(Shape::vector(elems), &data)?;
    let x2 = Tensor::from_slice(Shape::vector(elems), &data)?;
    let mut out = Tensor::zeros(Shape::vector(elems), DType::F32);

    // Binary elementwise ops take two inputs; Identity and Cast take one.
    let binary = matches!(op.as_str(), "Add" | "Sub" | "Mul" | "RealDiv");
    if !binary && op != "Identity" && op != "Cast" {
        bail!("'{op}' needs op-specific inputs; bench supports the elementwise ops, Identity, and Cast");
    }

    let run_once = |out: &mut Tensor| -> anyhow::Result<()> {
        let mut builder = KernelContext::build(op.as_str()).input(&x1);
        if binary {
            builder = builder.input(&x2);
        }
        let mut ctx = builder.output(out).finish(rt.sched());
        let status = rt.execute(&mut ctx);
        if status != KernelStatus::Ok {
            bail!("status {status}");
        }
        Ok(())
    };

    // Warmup.
    run_once(&mut out)?;

    let started = Instant::now();
    for _ in 0..iters {
        run_once(&mut out)?;
    }
    let elapsed = started.elapsed();

    let per_iter = elapsed.as_secs_f64() / iters as f64;
    let throughput = elems as f64 / per_iter / 1e6;
    println!("op:         {op}");
    println!("elements:   {elems}");
    println!("iterations: {iters}");
    println!("workers:    {}", rt.sched().workers());
    println!("per iter:   {:.3} ms", per_iter * 1000.0);
    println!("throughput: {throughput:.1} Melem/s");
    Ok(())
}
