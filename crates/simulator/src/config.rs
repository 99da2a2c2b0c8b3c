// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulator configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! trace_path = "./traces/memory_requests.txt"
//! format = "text"
//! unit = "KB"
//! show_events = true
//! ```

use crate::SimulatorError;
use std::path::{Path, PathBuf};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable block map and statistics table.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimulatorConfig {
    /// Path to the request-log file.
    pub trace_path: PathBuf,
    /// Report output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Cosmetic size unit label used in text reports.
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Whether the text report includes the per-request event log.
    #[serde(default = "default_true")]
    pub show_events: bool,
}

fn default_unit() -> String {
    "KB".to_string()
}

fn default_true() -> bool {
    true
}

impl SimulatorConfig {
    /// Creates a config for `trace_path` with all defaults.
    pub fn for_trace(trace_path: impl Into<PathBuf>) -> Self {
        Self {
            trace_path: trace_path.into(),
            format: OutputFormat::Text,
            unit: default_unit(),
            show_events: true,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SimulatorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulatorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SimulatorError> {
        toml::from_str(toml_str)
            .map_err(|e| SimulatorError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SimulatorError> {
        toml::to_string_pretty(self)
            .map_err(|e| SimulatorError::Config(format!("TOML serialise error: {e}")))
    }
}
