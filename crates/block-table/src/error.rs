// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the block table.

/// Caller precondition violations on block-table operations.
///
/// Running out of contiguous space is *not* an error — `allocate` reports
/// it through [`AllocateOutcome::NoFit`](crate::AllocateOutcome::NoFit).
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table cannot be created over an empty address space.
    #[error("total memory must be positive")]
    ZeroTotalMemory,

    /// Allocation requests must carry a positive size.
    #[error("process '{process}' requested a zero-sized allocation")]
    ZeroSizedRequest { process: String },

    /// Process names identify blocks and may not be empty.
    #[error("process name may not be empty")]
    EmptyProcessName,

    /// The process already owns a live block; it must release before
    /// requesting again.
    #[error("process '{process}' already owns an allocated block")]
    ProcessAlreadyLive { process: String },
}
