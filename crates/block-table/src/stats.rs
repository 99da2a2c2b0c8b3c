// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregate statistics derived from the current partition.
//!
//! [`MemoryStats`] is computed on demand by a single pass over the block
//! table — nothing here is cached, so the figures always reflect the table
//! as it stands. The two allocation counters are run-scoped and carried
//! over from the table itself.

/// Aggregate figures for one point-in-time view of the block table.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct MemoryStats {
    /// Size of the whole address space.
    pub total_memory: u64,
    /// Sum of sizes of allocated blocks.
    pub allocated_memory: u64,
    /// Sum of sizes of free blocks.
    pub free_memory: u64,
    /// Number of allocated blocks (one live process each).
    pub num_processes: usize,
    /// Number of free blocks.
    pub num_free_blocks: usize,
    /// Size of the largest free block, 0 if none.
    pub largest_free_block: u64,
    /// Requests satisfied since the table was created.
    pub successful_allocations: u64,
    /// Requests rejected for lack of a large enough free block.
    pub failed_allocations: u64,
}

impl MemoryStats {
    /// Fraction of the address space currently allocated, in percent.
    pub fn allocated_percent(&self) -> f64 {
        if self.total_memory == 0 {
            return 0.0;
        }
        self.allocated_memory as f64 * 100.0 / self.total_memory as f64
    }

    /// Fraction of the address space currently free, in percent.
    pub fn free_percent(&self) -> f64 {
        if self.total_memory == 0 {
            return 0.0;
        }
        self.free_memory as f64 * 100.0 / self.total_memory as f64
    }

    /// External fragmentation: the share of free memory that lies outside
    /// the single largest free block, in percent. 0 when nothing is free.
    ///
    /// This is the standard metric for first-fit partition allocators: it
    /// expresses how much free memory is unusable by the largest request
    /// the table could still satisfy.
    pub fn external_fragmentation(&self) -> f64 {
        if self.free_memory == 0 {
            return 0.0;
        }
        (self.free_memory - self.largest_free_block) as f64 * 100.0 / self.free_memory as f64
    }

    /// Returns a one-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} total: {} allocated ({:.2}%), {} free ({:.2}%) in {} block(s), \
             largest free {}, fragmentation {:.2}%, {} ok / {} failed",
            self.total_memory,
            self.allocated_memory,
            self.allocated_percent(),
            self.free_memory,
            self.free_percent(),
            self.num_free_blocks,
            self.largest_free_block,
            self.external_fragmentation(),
            self.successful_allocations,
            self.failed_allocations,
        )
    }
}
