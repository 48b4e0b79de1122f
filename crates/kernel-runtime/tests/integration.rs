// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: full operator invocations through the runtime.
//!
//! Each test goes the whole way — build the runtime, assemble a
//! context, execute by registry lookup — proving that the crates
//! compose: tensor model, broadcasting, worker pool, kernel contract,
//! operator bodies, status folding.

use kernel_runtime::{KernelRuntime, RuntimeConfig};
use kernel_api::KernelContext;
use kernel_api::KernelStatus;
use tensor_core::{DType, Shape, Tensor};

// ── Helpers ────────────────────────────────────────────────────

fn runtime() -> KernelRuntime {
    KernelRuntime::new(RuntimeConfig {
        num_threads: Some(2),
        enable_profiling: true,
    })
    .unwrap()
}

// ── Elementwise ────────────────────────────────────────────────

#[test]
fn test_add_broadcasts_scalar_into_vector() {
    let rt = runtime();
    let x1 = Tensor::from_scalar(1i8);
    let x2 = Tensor::from_slice(Shape::vector(2), &[1i8, 1]).unwrap();
    let mut out = Tensor::zeros(Shape::vector(2), DType::I8);
    let mut ctx = KernelContext::build("Add")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    assert_eq!(out.as_slice::<i8>().unwrap(), &[2, 2]);
}

#[test]
fn test_mismatched_dtypes_fail_without_touching_output() {
    let rt = runtime();
    let x1 = Tensor::from_slice(Shape::vector(2), &[1.0f32, 2.0]).unwrap();
    let x2 = Tensor::from_slice(Shape::vector(2), &[1.0f64, 2.0]).unwrap();
    let mut out = Tensor::from_slice(Shape::vector(2), &[42.0f32, 42.0]).unwrap();
    let mut ctx = KernelContext::build("Add")
        .input(&x1)
        .input(&x2)
        .output(&mut out)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::ParamInvalid);
    drop(ctx);
    assert_eq!(out.as_slice::<f32>().unwrap(), &[42.0, 42.0]);
}

#[test]
fn test_chained_ops_share_the_runtime() {
    // (x * 2 + 1) / 2, one op at a time through the registry.
    let rt = runtime();
    let x = Tensor::from_slice(Shape::vector(3), &[1.0f32, 2.0, 3.0]).unwrap();
    let two = Tensor::from_scalar(2.0f32);
    let one = Tensor::from_scalar(1.0f32);

    let mut doubled = Tensor::zeros(Shape::vector(3), DType::F32);
    let mut ctx = KernelContext::build("Mul")
        .input(&x)
        .input(&two)
        .output(&mut doubled)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);

    let mut plus_one = Tensor::zeros(Shape::vector(3), DType::F32);
    let mut ctx = KernelContext::build("Add")
        .input(&doubled)
        .input(&one)
        .output(&mut plus_one)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);

    let mut halved = Tensor::zeros(Shape::vector(3), DType::F32);
    let mut ctx = KernelContext::build("RealDiv")
        .input(&plus_one)
        .input(&two)
        .output(&mut halved)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);

    assert_eq!(halved.as_slice::<f32>().unwrap(), &[1.5, 2.5, 3.5]);
    assert_eq!(rt.metrics().total_invocations(), 3);
}

// ── Data movement ──────────────────────────────────────────────

#[test]
fn test_gather_v2_batched_columns() {
    let rt = runtime();
    let params = Tensor::from_slice(Shape::new(vec![2, 2]), &[1i32, 2, 3, 4]).unwrap();
    let indices = Tensor::from_slice(Shape::new(vec![2, 2]), &[0i32, 0, 1, 0]).unwrap();
    let mut out = Tensor::zeros(Shape::new(vec![2, 2]), DType::I32);
    let mut ctx = KernelContext::build("GatherV2")
        .input(&params)
        .input(&indices)
        .output(&mut out)
        .attr("axis", 1i64)
        .attr("batch_dims", 1i64)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    assert_eq!(out.as_slice::<i32>().unwrap(), &[1, 1, 4, 3]);
}

#[test]
fn test_pad_d_zero_border() {
    let rt = runtime();
    let x = Tensor::from_slice(
        Shape::new(vec![2, 4]),
        &[1i32, 2, 3, 4, 5, 6, 7, 8],
    )
    .unwrap();
    let mut out = Tensor::zeros(Shape::new(vec![4, 6]), DType::I32);
    let mut ctx = KernelContext::build("PadD")
        .input(&x)
        .output(&mut out)
        .attr("paddings", vec![1i64, 1, 1, 1])
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    #[rustfmt::skip]
    let expected = [
        0, 0, 0, 0, 0, 0,
        0, 1, 2, 3, 4, 0,
        0, 5, 6, 7, 8, 0,
        0, 0, 0, 0, 0, 0,
    ];
    assert_eq!(out.as_slice::<i32>().unwrap(), &expected);
}

#[test]
fn test_scatter_elements_rejects_out_of_range_negative_index() {
    let rt = runtime();
    let data = Tensor::zeros(Shape::vector(3), DType::F32);
    let indices = Tensor::from_slice(Shape::vector(1), &[-4i64]).unwrap();
    let updates = Tensor::from_slice(Shape::vector(1), &[1.0f32]).unwrap();
    let mut out = Tensor::from_slice(Shape::vector(3), &[7.0f32, 7.0, 7.0]).unwrap();
    let mut ctx = KernelContext::build("ScatterElements")
        .input(&data)
        .input(&indices)
        .input(&updates)
        .output(&mut out)
        .attr("axis", 0i64)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::ParamInvalid);
    drop(ctx);
    assert_eq!(out.as_slice::<f32>().unwrap(), &[7.0, 7.0, 7.0]);
}

#[test]
fn test_unpack_then_sum_segments() {
    let rt = runtime();
    let x = Tensor::from_slice(Shape::new(vec![2, 2]), &[1i32, 2, 3, 4]).unwrap();
    let mut row0 = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut row1 = Tensor::zeros(Shape::vector(2), DType::I32);
    let mut ctx = KernelContext::build("Unpack")
        .input(&x)
        .output(&mut row0)
        .output(&mut row1)
        .attr("num", 2i64)
        .attr("axis", 0i64)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    assert_eq!(row0.as_slice::<i32>().unwrap(), &[1, 2]);
    assert_eq!(row1.as_slice::<i32>().unwrap(), &[3, 4]);

    let ids = Tensor::from_slice(Shape::vector(2), &[0i32, 0]).unwrap();
    let num = Tensor::from_scalar(1i32);
    let mut summed = Tensor::zeros(Shape::vector(1), DType::I32);
    let mut ctx = KernelContext::build("UnsortedSegmentSum")
        .input(&row1)
        .input(&ids)
        .input(&num)
        .output(&mut summed)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    assert_eq!(summed.as_slice::<i32>().unwrap(), &[7]);
}

// ── Conversion ─────────────────────────────────────────────────

#[test]
fn test_cast_f32_to_i32() {
    let rt = runtime();
    let x = Tensor::from_slice(Shape::vector(3), &[1.7f32, -2.9, 3.0]).unwrap();
    let mut out = Tensor::zeros(Shape::vector(3), DType::I32);
    let mut ctx = KernelContext::build("Cast")
        .input(&x)
        .output(&mut out)
        .finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::Ok);
    drop(ctx);
    assert_eq!(out.as_slice::<i32>().unwrap(), &[1, -2, 3]);
}

// ── Boundary behavior ──────────────────────────────────────────

#[test]
fn test_unknown_op_type() {
    let rt = runtime();
    let mut ctx = KernelContext::build("Conv3DTranspose").finish(rt.sched());
    assert_eq!(rt.execute(&mut ctx), KernelStatus::ParamInvalid);
}

#[test]
fn test_config_from_toml_drives_the_pool() {
    let config = RuntimeConfig::from_toml("num_threads = 1\nenable_profiling = true").unwrap();
    let rt = KernelRuntime::new(config).unwrap();
    assert_eq!(rt.sched().workers(), 1);
    assert_eq!(rt.registry().len(), 11);
}
