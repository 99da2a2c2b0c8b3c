// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One contiguous run of address space and its allocation state.

use std::fmt;

/// Allocation state of a block.
///
/// Modelled as a sum type rather than an optional name so that "free" can
/// never be confused with "allocated to the empty-string process".
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", content = "process", rename_all = "snake_case")]
pub enum BlockState {
    /// The block is available for allocation.
    Free,
    /// The block is owned by the named process.
    Allocated(String),
}

/// A contiguous run of addresses inside the table's partition.
///
/// Sizes and offsets are `u64`: the address space is simulated, not host
/// memory, so it must not be clamped to the host's `usize`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    /// First address covered by this block.
    pub start: u64,
    /// Length of the run, always positive.
    pub size: u64,
    /// Free, or allocated to a process.
    pub state: BlockState,
}

impl Block {
    /// Creates a free block covering `[start, start + size)`.
    pub(crate) fn free(start: u64, size: u64) -> Self {
        Self {
            start,
            size,
            state: BlockState::Free,
        }
    }

    /// Creates a block allocated to `process`.
    pub(crate) fn allocated(start: u64, size: u64, process: impl Into<String>) -> Self {
        Self {
            start,
            size,
            state: BlockState::Allocated(process.into()),
        }
    }

    /// Returns `true` if the block is free.
    pub fn is_free(&self) -> bool {
        matches!(self.state, BlockState::Free)
    }

    /// Returns the owning process name, or `None` for a free block.
    pub fn owner(&self) -> Option<&str> {
        match &self.state {
            BlockState::Free => None,
            BlockState::Allocated(name) => Some(name),
        }
    }

    /// Last address covered by this block (inclusive).
    pub fn end(&self) -> u64 {
        self.start + self.size - 1
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            BlockState::Free => write!(f, "[{}-{}] FREE ({})", self.start, self.end(), self.size),
            BlockState::Allocated(name) => {
                write!(f, "[{}-{}] {} ({})", self.start, self.end(), name, self.size)
            }
        }
    }
}
