// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `opk list` command: print the registered kernels.

use kernel_runtime::{KernelRuntime, RuntimeConfig};

pub fn execute(config: RuntimeConfig) -> anyhow::Result<()> {
    let rt = KernelRuntime::new(config)?;
    let names = rt.registry().names();

    println!("{} registered kernels:", names.len());
    for name in names {
        println!("  {name}");
    }
    println!();
    println!("worker threads: {}", rt.sched().workers());
    Ok(())
}
