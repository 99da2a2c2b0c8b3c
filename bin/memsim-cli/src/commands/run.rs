// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim run` command: replay a request log and print the report.

use anyhow::Context as _;
use simulator::{OutputFormat, Simulation, SimulatorConfig, Trace};
use std::path::PathBuf;

pub fn execute(
    config_path: Option<PathBuf>,
    trace: Option<PathBuf>,
    format: Option<String>,
    no_events: bool,
) -> anyhow::Result<()> {
    // Config file first, CLI arguments on top.
    let mut config = match (&config_path, &trace) {
        (Some(path), _) => SimulatorConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        (None, Some(trace)) => SimulatorConfig::for_trace(trace),
        (None, None) => anyhow::bail!("either --trace or --config is required"),
    };
    if let Some(trace) = trace {
        config.trace_path = trace;
    }
    if let Some(format) = format {
        config.format = parse_format(&format)?;
    }
    if no_events {
        config.show_events = false;
    }

    let trace = Trace::from_file(&config.trace_path)?;
    tracing::info!(
        path = %config.trace_path.display(),
        requests = trace.requests.len(),
        "trace loaded"
    );

    let report = Simulation::run(&trace)?;

    match config.format {
        OutputFormat::Text => {
            print!("{}", report.render_text(&config.unit, config.show_events));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn parse_format(s: &str) -> anyhow::Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format '{other}'; expected 'text' or 'json'"),
    }
}
