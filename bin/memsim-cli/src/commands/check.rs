// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim check` command: validate a request log without running it.

use simulator::Trace;
use std::path::PathBuf;

pub fn execute(trace_path: PathBuf) -> anyhow::Result<()> {
    let trace = Trace::from_file(&trace_path)?;

    println!("Trace:         {}", trace_path.display());
    println!("Total memory:  {}", trace.total_memory);
    println!("Requests:      {}", trace.requests.len());
    println!("  REQUEST:     {}", trace.num_allocations());
    println!("  RELEASE:     {}", trace.num_releases());
    println!("OK");

    Ok(())
}
