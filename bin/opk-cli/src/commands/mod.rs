// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod bench;
pub mod list;
pub mod smoke;

use std::path::Path;

use kernel_runtime::RuntimeConfig;
use tracing_subscriber::EnvFilter;

/// Initialises the tracing subscriber from the `-v` count. `RUST_LOG`
/// wins when set.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Resolves the runtime configuration: the TOML file if given, then
/// the `--threads` flag on top.
pub fn load_config(path: Option<&Path>, threads: Option<usize>) -> anyhow::Result<RuntimeConfig> {
    let mut config = match path {
        Some(p) => RuntimeConfig::from_file(p)?,
        None => RuntimeConfig::default(),
    };
    if threads.is_some() {
        config.num_threads = threads;
    }
    Ok(config)
}
