// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simulator
//!
//! The driver layer around the [`block_table`] core: parses a request log,
//! replays it against a [`block_table::BlockTable`] one request at a time,
//! and produces a report of the final partition and aggregate statistics.
//!
//! # Request Log Format
//!
//! ```text
//! 1000
//! REQUEST P1 300
//! REQUEST P2 700
//! RELEASE P1
//! ```
//!
//! The first non-blank line is the total memory size; each following line
//! is `REQUEST <name> <size>` or `RELEASE <name>`, whitespace-delimited.
//! All validation happens here — the core never sees malformed input.
//!
//! # Example
//! ```
//! use simulator::{Simulation, Trace};
//!
//! let trace = Trace::parse("1000\nREQUEST P1 300\nRELEASE P1\n").unwrap();
//! let report = Simulation::run(&trace).unwrap();
//! assert_eq!(report.stats.free_memory, 1000);
//! ```

mod config;
mod error;
mod report;
mod simulation;
mod trace;

pub use config::{OutputFormat, SimulatorConfig};
pub use error::{SimulatorError, TraceError};
pub use report::SimulationReport;
pub use simulation::{Simulation, SimulationEvent};
pub use trace::{Request, Trace};
