// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # memsim
//!
//! Command-line interface for the first-fit memory allocation simulator.
//!
//! ## Usage
//! ```bash
//! # Replay a request log and print the final report
//! memsim run --trace traces/memory_requests.txt
//!
//! # Same, as JSON
//! memsim run --trace traces/memory_requests.txt --format json
//!
//! # Validate a request log without running it
//! memsim check --trace traces/memory_requests.txt
//!
//! # Built-in demo scenario (1000 KB address space)
//! memsim demo
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "memsim",
    about = "First-fit memory allocation simulator",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments take precedence).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a request log and print the final memory report.
    Run {
        /// Path to the request-log file.
        #[arg(short, long)]
        trace: Option<std::path::PathBuf>,

        /// Output format: text or json.
        #[arg(short, long)]
        format: Option<String>,

        /// Omit the per-request event log from the text report.
        #[arg(long)]
        no_events: bool,
    },

    /// Parse and validate a request log without running it.
    Check {
        /// Path to the request-log file.
        #[arg(short, long)]
        trace: std::path::PathBuf,
    },

    /// Run a built-in demo scenario over a 1000 KB address space.
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            trace,
            format,
            no_events,
        } => commands::run::execute(cli.config, trace, format, no_events),
        Commands::Check { trace } => commands::check::execute(trace),
        Commands::Demo => commands::demo::execute(),
    }
}
