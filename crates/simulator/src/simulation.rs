// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Trace replay against the block table.
//!
//! [`Simulation::run`] is the whole control flow of the system: build a
//! table from the trace header, feed it one request at a time in file
//! order, record one event per request, and derive the final report. The
//! replay is fully synchronous and deterministic — the same trace always
//! produces the same report.

use crate::{Request, SimulationReport, SimulatorError, Trace};
use block_table::{AllocateOutcome, BlockTable};

/// What happened to a single request during replay.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A `REQUEST` was satisfied at `start`.
    Granted { process: String, size: u64, start: u64 },
    /// A `REQUEST` found no free block large enough.
    Exhausted {
        process: String,
        size: u64,
        largest_free: u64,
    },
    /// A `RELEASE` returned `bytes` to the free pool.
    Released { process: String, bytes: u64 },
    /// A `RELEASE` named a process that owns nothing. Recorded for the
    /// report, but deliberately not counted as a failure anywhere.
    UnknownRelease { process: String },
}

/// Replays traces against a fresh block table.
pub struct Simulation;

impl Simulation {
    /// Runs `trace` to completion and returns the final report.
    ///
    /// Capacity failures are ordinary events and never abort the replay.
    /// A trace that violates a table precondition (e.g. a `REQUEST` for a
    /// name that is still live) aborts with [`SimulatorError::Table`].
    pub fn run(trace: &Trace) -> Result<SimulationReport, SimulatorError> {
        let mut table = BlockTable::new(trace.total_memory)?;
        let mut events = Vec::with_capacity(trace.requests.len());

        tracing::info!(
            total_memory = trace.total_memory,
            requests = trace.requests.len(),
            "starting simulation"
        );

        for request in &trace.requests {
            match request {
                Request::Allocate { process, size } => {
                    match table.allocate(process, *size)? {
                        AllocateOutcome::Fitted { start, size } => {
                            events.push(SimulationEvent::Granted {
                                process: process.clone(),
                                size,
                                start,
                            });
                        }
                        AllocateOutcome::NoFit { largest_free } => {
                            events.push(SimulationEvent::Exhausted {
                                process: process.clone(),
                                size: *size,
                                largest_free,
                            });
                        }
                    }
                }
                Request::Release { process } => {
                    let outcome = table.release(process);
                    if outcome.released() {
                        events.push(SimulationEvent::Released {
                            process: process.clone(),
                            bytes: outcome.released_bytes,
                        });
                    } else {
                        events.push(SimulationEvent::UnknownRelease {
                            process: process.clone(),
                        });
                    }
                }
            }
        }

        let stats = table.statistics();
        tracing::info!("simulation finished: {}", stats.summary());

        Ok(SimulationReport {
            total_memory: trace.total_memory,
            blocks: table.snapshot().to_vec(),
            stats,
            events,
        })
    }
}
