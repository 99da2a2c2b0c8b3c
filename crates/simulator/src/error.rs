// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for trace parsing and simulation.

use std::path::PathBuf;

/// Errors raised while reading or parsing a request log.
///
/// Every parse variant carries the 1-based line number so a bad trace file
/// can be fixed without guesswork.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("cannot read trace '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The trace is empty — the first line must be the total memory size.
    #[error("trace is missing the total-memory header line")]
    MissingHeader,

    /// The header line is not a positive integer.
    #[error("line {line}: invalid total memory '{value}' — expected a positive integer")]
    InvalidTotalMemory { line: usize, value: String },

    /// A request line does not start with `REQUEST` or `RELEASE`.
    #[error("line {line}: unknown directive '{directive}' — expected REQUEST or RELEASE")]
    UnknownDirective { line: usize, directive: String },

    /// A request line is missing a required field.
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    /// A `REQUEST` size is not a positive integer.
    #[error("line {line}: invalid size '{value}' — expected a positive integer")]
    InvalidSize { line: usize, value: String },
}

/// Errors raised while running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    /// The request log could not be parsed.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// The block table rejected a request precondition. A well-formed trace
    /// can still trip this, e.g. by requesting a name that is already live.
    #[error("table error: {0}")]
    Table(#[from] block_table::TableError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
