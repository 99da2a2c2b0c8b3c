// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Final simulation report and its text rendering.
//!
//! The text layout follows the original lab report: a block map with one
//! line per partition entry, then the statistics table. JSON output comes
//! for free through the `serde::Serialize` derive.

use crate::SimulationEvent;
use block_table::{Block, MemoryStats};
use std::fmt::Write as _;

/// Everything a simulation run produces: the final partition, the derived
/// statistics, and the per-request event log.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimulationReport {
    /// Size of the simulated address space.
    pub total_memory: u64,
    /// Final partition in address order.
    pub blocks: Vec<Block>,
    /// Aggregate figures derived from the final partition.
    pub stats: MemoryStats,
    /// One event per trace request, in trace order.
    pub events: Vec<SimulationEvent>,
}

const RULE: &str = "========================================";

impl SimulationReport {
    /// Renders the report as human-readable text.
    ///
    /// `unit` is a cosmetic label for sizes (the trace format itself is
    /// unit-less); `show_events` appends the per-request log.
    pub fn render_text(&self, unit: &str, show_events: bool) -> String {
        let mut out = String::new();

        writeln!(out, "{RULE}").unwrap();
        writeln!(out, "Final Memory State").unwrap();
        writeln!(out, "{RULE}").unwrap();
        for (i, block) in self.blocks.iter().enumerate() {
            let range = format!("[{}-{}]", block.start, block.end());
            match block.owner() {
                Some(name) => writeln!(
                    out,
                    "Block {}: {:<12} {} ({} {unit}) - ALLOCATED",
                    i + 1,
                    range,
                    name,
                    block.size,
                )
                .unwrap(),
                None => writeln!(
                    out,
                    "Block {}: {:<12} FREE ({} {unit})",
                    i + 1,
                    range,
                    block.size,
                )
                .unwrap(),
            }
        }

        writeln!(out).unwrap();
        writeln!(out, "{RULE}").unwrap();
        writeln!(out, "Memory Statistics").unwrap();
        writeln!(out, "{RULE}").unwrap();
        let s = &self.stats;
        writeln!(out, "Total Memory:           {} {unit}", s.total_memory).unwrap();
        writeln!(
            out,
            "Allocated Memory:       {} {unit} ({:.2}%)",
            s.allocated_memory,
            s.allocated_percent(),
        )
        .unwrap();
        writeln!(
            out,
            "Free Memory:            {} {unit} ({:.2}%)",
            s.free_memory,
            s.free_percent(),
        )
        .unwrap();
        writeln!(out, "Number of Processes:    {}", s.num_processes).unwrap();
        writeln!(out, "Number of Free Blocks:  {}", s.num_free_blocks).unwrap();
        writeln!(out, "Largest Free Block:     {} {unit}", s.largest_free_block).unwrap();
        writeln!(
            out,
            "External Fragmentation: {:.2}%",
            s.external_fragmentation(),
        )
        .unwrap();
        writeln!(out).unwrap();
        writeln!(out, "Successful Allocations: {}", s.successful_allocations).unwrap();
        writeln!(out, "Failed Allocations:     {}", s.failed_allocations).unwrap();
        writeln!(out, "{RULE}").unwrap();

        if show_events && !self.events.is_empty() {
            writeln!(out).unwrap();
            writeln!(out, "Request Log").unwrap();
            writeln!(out, "{RULE}").unwrap();
            for event in &self.events {
                writeln!(out, "{}", describe_event(event, unit)).unwrap();
            }
            writeln!(out, "{RULE}").unwrap();
        }

        out
    }
}

/// One log line per event, phrased like the original program's messages.
fn describe_event(event: &SimulationEvent, unit: &str) -> String {
    match event {
        SimulationEvent::Granted {
            process,
            size,
            start,
        } => format!("Request {process} of size {size} {unit} completed (start {start})"),
        SimulationEvent::Exhausted {
            process,
            size,
            largest_free,
        } => format!(
            "Request {process} of size {size} {unit} failed (largest free block: {largest_free})"
        ),
        SimulationEvent::Released { process, bytes } => {
            format!("Release of {process} completed ({bytes} {unit})")
        }
        SimulationEvent::UnknownRelease { process } => {
            format!("Release of {process} ignored (no such process)")
        }
    }
}
