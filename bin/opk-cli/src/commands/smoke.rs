// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `opk smoke` command: run every built-in operator once.
//!
//! Small fixed inputs per operator, checked against known outputs, so a
//! user can verify an installation (or a cross-compile) end to end
//! without writing any code.

use anyhow::bail;
use kernel_api::{KernelContext, KernelStatus};
use kernel_runtime::{KernelRuntime, RuntimeConfig};
use tensor_core::{DType, Shape, Tensor};

pub fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    let rt = KernelRuntime::new(config)?;
    let mut failures = 0usize;

    failures += check("Add", add(&rt));
    failures += check("Sub", sub(&rt));
    failures += check("Mul", mul(&rt));
    failures += check("RealDiv", real_div(&rt));
    failures += check("Identity", identity(&rt));
    failures += check("Cast", cast(&rt));
    failures += check("GatherV2", gather(&rt));
    failures += check("PadD", pad(&rt));
    failures += check("ScatterElements", scatter(&rt));
    failures += check("Unpack", unpack(&rt));
    failures += check("UnsortedSegmentSum", segment_sum(&rt));

    println!();
    println!("{}", rt.metrics().summary());
    if failures > 0 {
        bail!("{failures} operator(s) failed the smoke pass");
    }
    println!("all operators passed");
    Ok(())
}

fn check(name: &str, result: anyhow::Result<()>) -> usize {
    match result {
        Ok(()) => {
            println!("  {name:<20} ok");
            0
        }
        Err(e) => {
            println!("  {name:<20} FAILED: {e}");
            1
        }
    }
}

fn expect_ok(status: KernelStatus) -> anyhow::Result<()> {
    if status != KernelStatus::Ok {
        bail!("status {status}");
    }
    Ok(())
}

fn expect_i32(t: &Tensor, want: &[i32]) -> anyhow::Result<()> {
    let got = t.as_slice::<i32>()?;
    if got != want {
        bail!("got {got:?}, want {want:?}");
    }
    Ok(())
}

fn add(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x1 = Tensor::from_slice(Shape::new(vec![2, 1]), &[1i32, 2])?;
    let x2 = Tensor::from_slice(Shape::new(vec![1, 2]), &[10i32, 20])?;
    let mut out = Tensor::zeros(Shape::new(vec![2, 2]), DType::I32);
    let mut ctx = KernelContext::build("Add")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[11, 21, 12, 22])
}

fn sub(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x1 = Tensor::from_slice(Shape::vector(2), &[10i32, 20])?;
    let x2 = Tensor::from_scalar(1i32);
    let mut out = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut ctx = KernelContext::build("Sub")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[9, 19])
}

fn mul(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x1 = Tensor::from_slice(Shape::vector(3), &[1i32, 2, 3])?;
    let x2 = Tensor::from_scalar(3i32);
    let mut out = Tensor::zeros(Shape::vector(3), DType::I32);
    let mut ctx = KernelContext::build("Mul")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[3, 6, 9])
}

fn real_div(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x1 = Tensor::from_slice(Shape::vector(2), &[1.0f32, 3.0])?;
    let x2 = Tensor::from_scalar(2.0f32);
    let mut out = Tensor::zeros(Shape::vector(2), DType::F32);
    let mut ctx = KernelContext::build("RealDiv")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    let got = out.as_slice::<f32>()?;
    if got != [0.5, 1.5] {
        bail!("got {got:?}");
    }
    Ok(())
}

fn identity(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x = Tensor::from_slice(Shape::vector(3), &[7i32, 8, 9])?;
    let mut out = Tensor::zeros(Shape::vector(3), DType::I32);
    let mut ctx = KernelContext::build("Identity")
        .input(&x)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[7, 8, 9])
}

fn cast(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x = Tensor::from_slice(Shape::vector(3), &[1.7f32, -2.9, 3.0])?;
    let mut out = Tensor::zeros(Shape::vector(3), DType::I32);
    let mut ctx = KernelContext::build("Cast")
        .input(&x)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[1, -2, 3])
}

fn gather(rt: &KernelRuntime) -> anyhow::Result<()> {
    let params = Tensor::from_slice(Shape::new(vec![2, 2]), &[1i32, 2, 3, 4])?;
    let indices = Tensor::from_slice(Shape::new(vec![2, 2]), &[0i32, 0, 1, 0])?;
    let mut out = Tensor::zeros(Shape::new(vec![2, 2]), DType::I32);
    let mut ctx = KernelContext::build("GatherV2")
        .input(&params)
        .input(&indices)
        .output(&mut out)
        .attr("axis", 1i64)
        .attr("batch_dims", 1i64)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[1, 1, 4, 3])
}

fn pad(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x = Tensor::from_slice(Shape::vector(2), &[1i32, 2])?;
    let mut out = Tensor::zeros(Shape::vector(4), DType::I32);
    let mut ctx = KernelContext::build("PadD")
        .input(&x)
        .output(&mut out)
        .attr("paddings", vec![1i64, 1])
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[0, 1, 2, 0])
}

fn scatter(rt: &KernelRuntime) -> anyhow::Result<()> {
    let data = Tensor::from_slice(Shape::vector(4), &[1i32, 2, 3, 4])?;
    let indices = Tensor::from_slice(Shape::vector(1), &[2i32])?;
    let updates = Tensor::from_slice(Shape::vector(1), &[9i32])?;
    let mut out = Tensor::zeros(Shape::vector(4), DType::I32);
    let mut ctx = KernelContext::build("ScatterElements")
        .input(&data)
        .input(&indices)
        .input(&updates)
        .output(&mut out)
        .attr("axis", 0i64)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[1, 2, 9, 4])
}

fn unpack(rt: &KernelRuntime) -> anyhow::Result<()> {
    let x = Tensor::from_slice(Shape::new(vec![2, 2]), &[1i32, 2, 3, 4])?;
    let mut a = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut b = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut ctx = KernelContext::build("Unpack")
        .input(&x)
        .output(&mut a)
        .output(&mut b)
        .attr("num", 2i64)
        .attr("axis", 0i64)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&a, &[1, 2])?;
    expect_i32(&b, &[3, 4])
}

fn segment_sum(rt: &KernelRuntime) -> anyhow::Result<()> {
    let data = Tensor::from_slice(Shape::vector(4), &[1i32, 2, 3, 4])?;
    let ids = Tensor::from_slice(Shape::vector(4), &[0i32, 1, 0, 1])?;
    let num = Tensor::from_scalar(2i32);
    let mut out = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut ctx = KernelContext::build("UnsortedSegmentSum")
        .input(&data)
        .input(&ids)
        .input(&num)
        .output(&mut out)
        .finish(rt.sched());
    expect_ok(rt.execute(&mut ctx))?;
    drop(ctx);
    expect_i32(&out, &[4, 6])
}
