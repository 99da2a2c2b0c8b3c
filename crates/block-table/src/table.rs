// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The block table: first-fit allocation with split and coalesce.
//!
//! The [`BlockTable`] owns an ordered, gapless partition of
//! `[0, total_memory)`. It:
//!
//! 1. Scans blocks in address order on `allocate` and takes the *first*
//!    free block large enough (First-Fit), splitting off a free remainder
//!    when the match is larger than the request.
//! 2. Flips the matching block back to free on `release` and merges every
//!    adjacent free pair before returning, so consecutive free blocks never
//!    survive an operation.
//! 3. Counts satisfied and rejected requests for the run.
//!
//! # Atomicity
//! Every operation is synchronous and leaves the table in a consistent
//! state; a rejected request leaves it untouched. There is no interior
//! mutability — callers serialize access through `&mut`.

use crate::{Block, BlockState, MemoryStats, TableError};

/// Result of an allocation request. Both variants are expected outcomes;
/// capacity exhaustion is not an error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocateOutcome {
    /// A free block was found; the process now owns `[start, start + size)`.
    Fitted { start: u64, size: u64 },
    /// No single free block could hold the request. `largest_free` is the
    /// biggest block that was available (0 if none) — first-fit never
    /// aggregates non-contiguous free space.
    NoFit { largest_free: u64 },
}

impl AllocateOutcome {
    /// Returns `true` for [`AllocateOutcome::Fitted`].
    pub fn is_fitted(&self) -> bool {
        matches!(self, AllocateOutcome::Fitted { .. })
    }
}

/// Result of a release. Releasing a name that owns nothing is a silent
/// no-op; the zero counts let the caller tell the cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ReleaseOutcome {
    /// Number of blocks returned to the free pool (0 or 1 under normal
    /// operation; the scan tolerates duplicates for robustness).
    pub released_blocks: usize,
    /// Total size returned to the free pool.
    pub released_bytes: u64,
}

impl ReleaseOutcome {
    /// Returns `true` if at least one block was released.
    pub fn released(&self) -> bool {
        self.released_blocks > 0
    }
}

/// A first-fit partition allocator over `[0, total_memory)`.
///
/// # Example
/// ```
/// use block_table::BlockTable;
///
/// let mut table = BlockTable::new(1000).unwrap();
/// table.allocate("P1", 200).unwrap();
/// table.allocate("P2", 200).unwrap();
/// table.release("P1");
///
/// // P1's region is free again and sits at the lowest address,
/// // so the next fitting request reuses it.
/// let outcome = table.allocate("P3", 150).unwrap();
/// assert!(matches!(
///     outcome,
///     block_table::AllocateOutcome::Fitted { start: 0, size: 150 }
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct BlockTable {
    /// Size of the whole address space.
    total_memory: u64,
    /// Address-ordered, gapless partition of the address space.
    blocks: Vec<Block>,
    /// Requests satisfied since creation.
    successful_allocations: u64,
    /// Requests rejected for lack of a large enough free block.
    failed_allocations: u64,
}

impl BlockTable {
    /// Creates a table with a single free block spanning the address space.
    ///
    /// Returns [`TableError::ZeroTotalMemory`] when `total_memory == 0`.
    pub fn new(total_memory: u64) -> Result<Self, TableError> {
        if total_memory == 0 {
            return Err(TableError::ZeroTotalMemory);
        }
        Ok(Self {
            total_memory,
            blocks: vec![Block::free(0, total_memory)],
            successful_allocations: 0,
            failed_allocations: 0,
        })
    }

    /// Size of the whole address space.
    pub fn total_memory(&self) -> u64 {
        self.total_memory
    }

    /// Allocates `size` units to `process` using First-Fit.
    ///
    /// Scans blocks in address order and takes the lowest-address free
    /// block with `block.size >= size`, even if a later block would fit
    /// more tightly. A larger match is split into an allocated prefix and
    /// a free remainder. When no block fits, the table is left untouched
    /// and [`AllocateOutcome::NoFit`] is returned.
    ///
    /// Precondition violations (empty name, zero size, a name that already
    /// owns a block) are rejected before any state changes.
    pub fn allocate(&mut self, process: &str, size: u64) -> Result<AllocateOutcome, TableError> {
        if process.is_empty() {
            return Err(TableError::EmptyProcessName);
        }
        if size == 0 {
            return Err(TableError::ZeroSizedRequest {
                process: process.to_string(),
            });
        }
        if self.is_live(process) {
            return Err(TableError::ProcessAlreadyLive {
                process: process.to_string(),
            });
        }

        for i in 0..self.blocks.len() {
            let block = &self.blocks[i];
            if !block.is_free() || block.size < size {
                continue;
            }

            let start = block.start;
            let original_size = block.size;

            self.blocks[i] = Block::allocated(start, size, process);
            if original_size > size {
                // Split: free remainder keeps the partition gapless.
                let remainder = Block::free(start + size, original_size - size);
                self.blocks.insert(i + 1, remainder);
            }

            self.successful_allocations += 1;
            tracing::info!(process, size, start, "request granted");
            self.debug_check_invariants();
            return Ok(AllocateOutcome::Fitted { start, size });
        }

        let largest_free = self
            .blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0);

        self.failed_allocations += 1;
        tracing::info!(process, size, largest_free, "request failed");
        Ok(AllocateOutcome::NoFit { largest_free })
    }

    /// Releases every block owned by `process`, then coalesces.
    ///
    /// The scan walks a stable range of indices and only flips ownership —
    /// it never inserts or removes, so a match near the end cannot be
    /// skipped. Under the table's uniqueness invariant at most one block
    /// matches; the exhaustive scan is robustness, not a feature. Releasing
    /// a name that owns nothing changes nothing and emits no signal.
    pub fn release(&mut self, process: &str) -> ReleaseOutcome {
        let mut released_blocks = 0;
        let mut released_bytes = 0;

        for block in &mut self.blocks {
            if block.owner() == Some(process) {
                released_bytes += block.size;
                released_blocks += 1;
                block.state = BlockState::Free;
            }
        }

        if released_blocks > 0 {
            tracing::info!(process, released_bytes, "release completed");
        }

        // Unconditional: a no-op when nothing adjacent is free.
        self.coalesce();
        self.debug_check_invariants();

        ReleaseOutcome {
            released_blocks,
            released_bytes,
        }
    }

    /// Ordered read-only view of the partition, for reporting.
    pub fn snapshot(&self) -> &[Block] {
        &self.blocks
    }

    /// Derives aggregate statistics in a single pass over the table.
    pub fn statistics(&self) -> MemoryStats {
        let mut stats = MemoryStats {
            total_memory: self.total_memory,
            successful_allocations: self.successful_allocations,
            failed_allocations: self.failed_allocations,
            ..Default::default()
        };

        for block in &self.blocks {
            if block.is_free() {
                stats.free_memory += block.size;
                stats.num_free_blocks += 1;
                stats.largest_free_block = stats.largest_free_block.max(block.size);
            } else {
                stats.allocated_memory += block.size;
                stats.num_processes += 1;
            }
        }

        stats
    }

    /// Returns `true` if `process` currently owns a block.
    pub fn is_live(&self, process: &str) -> bool {
        self.blocks.iter().any(|b| b.owner() == Some(process))
    }

    /// Merges every run of adjacent free blocks into its leftmost member.
    ///
    /// After a merge the scan steps back one position so a run of three or
    /// more free blocks collapses into a single block before the scan moves
    /// on. Idempotent: a second invocation changes nothing.
    fn coalesce(&mut self) {
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let merged = self.blocks.remove(i + 1);
                self.blocks[i].size += merged.size;
                tracing::debug!(
                    start = self.blocks[i].start,
                    size = self.blocks[i].size,
                    "coalesced adjacent free blocks"
                );
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
    }

    /// Debug-build check of the partition invariants. An invariant breach
    /// is an internal defect, never a user-facing error.
    fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(!self.blocks.is_empty());
            debug_assert_eq!(self.blocks[0].start, 0);

            let mut expected_start = 0;
            let mut prev_free = false;
            for block in &self.blocks {
                debug_assert!(block.size > 0, "empty block at {}", block.start);
                debug_assert_eq!(block.start, expected_start, "gap before {}", block.start);
                debug_assert!(
                    !(prev_free && block.is_free()),
                    "adjacent free blocks at {}",
                    block.start
                );
                prev_free = block.is_free();
                expected_start = block.start + block.size;
            }
            debug_assert_eq!(expected_start, self.total_memory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders the partition as `"[0-299 P1][300-999 FREE]"` for assertions.
    fn layout(table: &BlockTable) -> String {
        table
            .snapshot()
            .iter()
            .map(|b| {
                format!(
                    "[{}-{} {}]",
                    b.start,
                    b.end(),
                    b.owner().unwrap_or("FREE")
                )
            })
            .collect()
    }

    /// Checks the conservation law and partition shape after an operation.
    fn assert_consistent(table: &BlockTable) {
        let stats = table.statistics();
        assert_eq!(
            stats.allocated_memory + stats.free_memory,
            table.total_memory()
        );

        let mut expected_start = 0;
        let mut prev_free = false;
        for block in table.snapshot() {
            assert!(block.size > 0);
            assert_eq!(block.start, expected_start);
            assert!(!(prev_free && block.is_free()), "adjacent free blocks");
            prev_free = block.is_free();
            expected_start = block.start + block.size;
        }
        assert_eq!(expected_start, table.total_memory());
    }

    #[test]
    fn test_new_single_free_block() {
        let table = BlockTable::new(1000).unwrap();
        assert_eq!(layout(&table), "[0-999 FREE]");
        assert_consistent(&table);
    }

    #[test]
    fn test_new_zero_total_memory() {
        assert!(matches!(
            BlockTable::new(0),
            Err(TableError::ZeroTotalMemory)
        ));
    }

    #[test]
    fn test_allocate_with_split() {
        let mut table = BlockTable::new(1000).unwrap();
        let outcome = table.allocate("P1", 300).unwrap();
        assert_eq!(outcome, AllocateOutcome::Fitted { start: 0, size: 300 });
        assert_eq!(layout(&table), "[0-299 P1][300-999 FREE]");
        assert_consistent(&table);
    }

    #[test]
    fn test_allocate_exact_fit_no_split() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        let outcome = table.allocate("P2", 700).unwrap();
        assert_eq!(
            outcome,
            AllocateOutcome::Fitted {
                start: 300,
                size: 700
            }
        );
        assert_eq!(layout(&table), "[0-299 P1][300-999 P2]");
        assert_eq!(table.statistics().free_memory, 0);
        assert_consistent(&table);
    }

    #[test]
    fn test_allocate_no_fit_leaves_table_unchanged() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();

        let before = layout(&table);
        let outcome = table.allocate("P2", 800).unwrap();
        assert_eq!(outcome, AllocateOutcome::NoFit { largest_free: 700 });
        assert_eq!(layout(&table), before);

        let stats = table.statistics();
        assert_eq!(stats.failed_allocations, 1);
        assert_eq!(stats.successful_allocations, 1);
    }

    #[test]
    fn test_first_fit_prefers_lowest_address_over_tighter_fit() {
        let mut table = BlockTable::new(1000).unwrap();
        // [P1 100][hole 200][P3 100][hole 150][P5 rest]
        table.allocate("P1", 100).unwrap();
        table.allocate("P2", 200).unwrap();
        table.allocate("P3", 100).unwrap();
        table.allocate("P4", 150).unwrap();
        table.allocate("P5", 450).unwrap();
        table.release("P2");
        table.release("P4");

        // 150 fits the 150-hole exactly, but the 200-hole comes first.
        let outcome = table.allocate("P6", 150).unwrap();
        assert_eq!(
            outcome,
            AllocateOutcome::Fitted {
                start: 100,
                size: 150
            }
        );
        assert_consistent(&table);
    }

    #[test]
    fn test_no_fit_despite_enough_total_free_memory() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 200).unwrap();
        table.allocate("P2", 200).unwrap();
        table.allocate("P3", 200).unwrap();
        table.allocate("P4", 400).unwrap();
        table.release("P1");
        table.release("P3");

        // 400 free in total, but fragmented into two 200-blocks.
        let outcome = table.allocate("P5", 400).unwrap();
        assert_eq!(outcome, AllocateOutcome::NoFit { largest_free: 200 });
        assert_consistent(&table);
    }

    #[test]
    fn test_release_without_merge() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        table.allocate("P2", 700).unwrap();

        let outcome = table.release("P1");
        assert_eq!(outcome.released_blocks, 1);
        assert_eq!(outcome.released_bytes, 300);
        assert_eq!(layout(&table), "[0-299 FREE][300-999 P2]");
        assert_consistent(&table);
    }

    #[test]
    fn test_release_coalesces_three_way_run() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 200).unwrap();
        table.allocate("P2", 200).unwrap();
        table.allocate("P3", 200).unwrap();

        table.release("P2");
        table.release("P1");

        // P1+P2 merge with each other and extend to address 0.
        assert_eq!(
            layout(&table),
            "[0-399 FREE][400-599 P3][600-999 FREE]"
        );
        assert_consistent(&table);
    }

    #[test]
    fn test_release_merges_with_both_neighbours() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 200).unwrap();
        table.allocate("P2", 200).unwrap();
        table.allocate("P3", 200).unwrap();
        table.allocate("P4", 400).unwrap();
        table.release("P1");
        table.release("P3");
        assert_eq!(
            layout(&table),
            "[0-199 FREE][200-399 P2][400-599 FREE][600-999 P4]"
        );

        // Free on both sides: one block must span all three ranges.
        table.release("P2");
        assert_eq!(layout(&table), "[0-599 FREE][600-999 P4]");
        assert_consistent(&table);
    }

    #[test]
    fn test_release_unknown_name_is_silent_noop() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        let before = layout(&table);
        let counters_before = table.statistics();

        let outcome = table.release("ghost");
        assert!(!outcome.released());
        assert_eq!(layout(&table), before);

        let counters_after = table.statistics();
        assert_eq!(
            counters_before.successful_allocations,
            counters_after.successful_allocations
        );
        assert_eq!(
            counters_before.failed_allocations,
            counters_after.failed_allocations
        );
    }

    #[test]
    fn test_released_name_can_reallocate() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        table.release("P1");
        let outcome = table.allocate("P1", 500).unwrap();
        assert_eq!(outcome, AllocateOutcome::Fitted { start: 0, size: 500 });
        assert_consistent(&table);
    }

    #[test]
    fn test_duplicate_live_name_rejected_without_side_effects() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        let before = layout(&table);

        let err = table.allocate("P1", 100).unwrap_err();
        assert!(matches!(err, TableError::ProcessAlreadyLive { .. }));
        assert_eq!(layout(&table), before);
        assert_eq!(table.statistics().successful_allocations, 1);
        assert_eq!(table.statistics().failed_allocations, 0);
    }

    #[test]
    fn test_zero_size_and_empty_name_rejected() {
        let mut table = BlockTable::new(1000).unwrap();
        assert!(matches!(
            table.allocate("P1", 0),
            Err(TableError::ZeroSizedRequest { .. })
        ));
        assert!(matches!(
            table.allocate("", 10),
            Err(TableError::EmptyProcessName)
        ));
        assert_eq!(layout(&table), "[0-999 FREE]");
    }

    #[test]
    fn test_allocate_whole_address_space() {
        let mut table = BlockTable::new(1000).unwrap();
        let outcome = table.allocate("P1", 1000).unwrap();
        assert_eq!(outcome, AllocateOutcome::Fitted { start: 0, size: 1000 });
        assert_eq!(layout(&table), "[0-999 P1]");
        assert_eq!(table.statistics().num_free_blocks, 0);
        assert_eq!(table.statistics().largest_free_block, 0);
        assert_consistent(&table);
    }

    #[test]
    fn test_coalesce_is_idempotent() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 200).unwrap();
        table.allocate("P2", 200).unwrap();
        table.release("P1");
        table.release("P2");

        let before = layout(&table);
        table.coalesce();
        assert_eq!(layout(&table), before);
    }

    #[test]
    fn test_statistics_after_mixed_workload() {
        let mut table = BlockTable::new(1000).unwrap();
        table.allocate("P1", 300).unwrap();
        table.allocate("P2", 800).unwrap(); // NoFit.
        table.allocate("P2", 700).unwrap();
        table.release("P1");

        let stats = table.statistics();
        assert_eq!(stats.total_memory, 1000);
        assert_eq!(stats.allocated_memory, 700);
        assert_eq!(stats.free_memory, 300);
        assert_eq!(stats.num_processes, 1);
        assert_eq!(stats.num_free_blocks, 1);
        assert_eq!(stats.largest_free_block, 300);
        assert_eq!(stats.successful_allocations, 2);
        assert_eq!(stats.failed_allocations, 1);
        assert_eq!(stats.external_fragmentation(), 0.0);
    }

    #[test]
    fn test_invariants_across_random_looking_workload() {
        // A fixed churn sequence; every step must keep the partition sound.
        let mut table = BlockTable::new(4096).unwrap();
        let sizes = [64, 512, 128, 1024, 256, 32, 2048, 96];
        for (i, size) in sizes.iter().enumerate() {
            table.allocate(&format!("P{i}"), *size).unwrap();
            assert_consistent(&table);
        }
        for i in [1, 3, 5] {
            table.release(&format!("P{i}"));
            assert_consistent(&table);
        }
        for (i, size) in [(8usize, 300u64), (9, 512), (10, 700)] {
            let _ = table.allocate(&format!("P{i}"), size).unwrap();
            assert_consistent(&table);
        }
        for i in 0..11 {
            table.release(&format!("P{i}"));
            assert_consistent(&table);
        }
        // Everything released: back to one free block.
        assert_eq!(layout(&table), "[0-4095 FREE]");
    }

    #[test]
    fn test_determinism_same_sequence_same_state() {
        let run = || {
            let mut table = BlockTable::new(1000).unwrap();
            table.allocate("A", 100).unwrap();
            table.allocate("B", 250).unwrap();
            table.release("A");
            table.allocate("C", 80).unwrap();
            table.allocate("D", 999).unwrap(); // NoFit.
            table.release("B");
            (layout(&table), table.statistics())
        };
        assert_eq!(run(), run());
    }
}
