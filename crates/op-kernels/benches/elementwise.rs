// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use compute_sched::SchedPool;
use kernel_api::{CpuKernel, KernelContext};
use op_kernels::AddKernel;
use tensor_core::{DType, Shape, Tensor};

fn bench_add_same_shape(c: &mut Criterion) {
    let sched = SchedPool::new(None).unwrap();
    let n = 1 << 20;
    let data: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let x1 = Tensor::from_slice(Shape::vector(n), &data).unwrap();
    let x2 = Tensor::from_slice(Shape::vector(n), &data).unwrap();
    let mut out = Tensor::zeros(Shape::vector(n), DType::F32);

    c.bench_function("add_f32_1m_same_shape", |b| {
        b.iter(|| {
            let mut ctx = KernelContext::build("Add")
                .input(black_box(&x1))
                .input(black_box(&x2))
                .output(&mut out)
                .finish(&sched);
            AddKernel.compute(&mut ctx).unwrap();
        })
    });
}

fn bench_add_broadcast_row(c: &mut Criterion) {
    let sched = SchedPool::new(None).unwrap();
    let (rows, cols) = (1024, 1024);
    let matrix: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
    let row: Vec<f32> = (0..cols).map(|i| i as f32).collect();
    let x1 = Tensor::from_slice(Shape::new(vec![rows, cols]), &matrix).unwrap();
    let x2 = Tensor::from_slice(Shape::new(vec![1, cols]), &row).unwrap();
    let mut out = Tensor::zeros(Shape::new(vec![rows, cols]), DType::F32);

    c.bench_function("add_f32_1m_broadcast_row", |b| {
        b.iter(|| {
            let mut ctx = KernelContext::build("Add")
                .input(black_box(&x1))
                .input(black_box(&x2))
                .output(&mut out)
                .finish(&sched);
            AddKernel.compute(&mut ctx).unwrap();
        })
    });
}

criterion_group!(benches, bench_add_same_shape, bench_add_broadcast_row);
criterion_main!(benches);
