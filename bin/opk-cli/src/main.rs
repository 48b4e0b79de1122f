// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # opk
//!
//! Command-line interface for the opkernel-rt operator runtime.
//!
//! ## Usage
//! ```bash
//! # List the registered kernels
//! opk list
//!
//! # Run a smoke pass over every built-in operator
//! opk smoke --threads 2
//!
//! # Time one operator on a synthetic workload
//! opk bench --op Add --elems 1048576 --iters 100
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "opk",
    about = "CPU operator kernel runtime for tensor workloads",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Number of worker threads (defaults to online CPU cores).
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the kernels registered in the built-in registry.
    List,

    /// Run every built-in operator once on small fixtures.
    Smoke,

    /// Benchmark one operator on a synthetic workload.
    Bench {
        /// Operation type to benchmark (e.g., "Add", "Cast").
        #[arg(short, long, default_value = "Add")]
        op: String,

        /// Number of elements per input tensor.
        #[arg(short, long, default_value_t = 1 << 20)]
        elems: usize,

        /// Number of timed iterations.
        #[arg(short, long, default_value_t = 100)]
        iters: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref(), cli.threads)?;

    match cli.command {
        Commands::List => commands::list::execute(config),
        Commands::Smoke => commands::smoke::execute(config),
        Commands::Bench { op, elems, iters } => commands::bench::execute(config, op, elems, iters),
    }
}
