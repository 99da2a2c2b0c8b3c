// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # block-table
//!
//! A first-fit partition allocator over a single fixed-size address space.
//! The table partitions `[0, total_memory)` into an ordered run of contiguous
//! blocks, splits a free block when a request is smaller than it, and
//! coalesces adjacent free blocks on every release.
//!
//! # Key Components
//!
//! - [`BlockTable`] — the allocator: owns the ordered block sequence, runs
//!   the first-fit scan, splits on allocation, coalesces on release, and
//!   tracks the success/failure counters.
//! - [`Block`] / [`BlockState`] — one contiguous run of addresses and its
//!   free-or-allocated state.
//! - [`MemoryStats`] — aggregate figures derived from the current partition
//!   (utilisation, free-block counts, external fragmentation).
//!
//! # Invariants
//!
//! The table maintains a strict partition at all times: blocks are gapless
//! and address-ordered, the first block starts at 0, the last ends at
//! `total_memory - 1`, no block is empty, and no two adjacent blocks are
//! both free once an operation returns. Capacity failure on `allocate` is an
//! expected outcome, not an error — only caller precondition violations
//! (zero size, empty name, duplicate live name) surface as [`TableError`].
//!
//! # Example
//! ```
//! use block_table::{AllocateOutcome, BlockTable};
//!
//! let mut table = BlockTable::new(1000).unwrap();
//!
//! // First-fit: P1 lands at the lowest address.
//! let outcome = table.allocate("P1", 300).unwrap();
//! assert!(matches!(outcome, AllocateOutcome::Fitted { start: 0, size: 300 }));
//!
//! // 700 KB remain in one free block; an 800 KB request cannot fit.
//! let outcome = table.allocate("P2", 800).unwrap();
//! assert!(matches!(outcome, AllocateOutcome::NoFit { largest_free: 700 }));
//!
//! table.release("P1");
//! assert_eq!(table.statistics().free_memory, 1000);
//! ```

mod block;
mod error;
mod stats;
pub mod table;

pub use block::{Block, BlockState};
pub use error::TableError;
pub use stats::MemoryStats;
pub use table::{AllocateOutcome, BlockTable, ReleaseOutcome};
