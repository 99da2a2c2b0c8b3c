// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `memsim demo` command: a built-in scenario over a 1000 KB space.
//!
//! Walks through the classic first-fit lifecycle: split on allocation, a
//! request too large for any single hole, an exact fit, and a release that
//! coalesces with free neighbours on both sides.

use simulator::{Simulation, Trace};

const DEMO_TRACE: &str = "\
1000
REQUEST P1 200
REQUEST P2 200
REQUEST P3 200
REQUEST P4 400
RELEASE P1
RELEASE P3
REQUEST P5 400
RELEASE P2
RELEASE ghost
";

pub fn execute() -> anyhow::Result<()> {
    println!("Running built-in demo trace:\n");
    for line in DEMO_TRACE.lines() {
        println!("  {line}");
    }
    println!();

    let trace = Trace::parse(DEMO_TRACE).expect("demo trace is well-formed");
    let report = Simulation::run(&trace)?;

    print!("{}", report.render_text("KB", true));
    Ok(())
}
