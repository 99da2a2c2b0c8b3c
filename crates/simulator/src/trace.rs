// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Request-log parsing.
//!
//! A [`Trace`] is the parsed form of a request log: the total memory size
//! from the header line plus the ordered request sequence. Parsing is the
//! boundary where all input validation happens; downstream code only ever
//! sees well-typed requests.

use crate::TraceError;
use std::path::Path;

/// One parsed request-log line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    /// `REQUEST <process> <size>`
    Allocate { process: String, size: u64 },
    /// `RELEASE <process>`
    Release { process: String },
}

/// A parsed request log: header plus ordered requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Trace {
    /// Total memory size from the header line.
    pub total_memory: u64,
    /// Requests in file order.
    pub requests: Vec<Request>,
}

impl Trace {
    /// Parses a request log from a string.
    ///
    /// The first non-blank line must be a positive integer (the total
    /// memory size); every following non-blank line is `REQUEST <name>
    /// <size>` or `RELEASE <name>`. Tokens beyond the expected ones are
    /// ignored, matching the original log format's leniency. Blank lines
    /// are skipped anywhere.
    pub fn parse(input: &str) -> Result<Self, TraceError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (header_line, header) = lines.next().ok_or(TraceError::MissingHeader)?;
        let total_memory = parse_positive(header).ok_or_else(|| TraceError::InvalidTotalMemory {
            line: header_line,
            value: header.to_string(),
        })?;

        let mut requests = Vec::new();
        for (line, text) in lines {
            let mut fields = text.split_whitespace();
            let directive = fields.next().expect("non-blank line has a first token");

            match directive {
                "REQUEST" => {
                    let process = fields.next().ok_or(TraceError::MissingField {
                        line,
                        field: "process name",
                    })?;
                    let size_text = fields.next().ok_or(TraceError::MissingField {
                        line,
                        field: "request size",
                    })?;
                    let size =
                        parse_positive(size_text).ok_or_else(|| TraceError::InvalidSize {
                            line,
                            value: size_text.to_string(),
                        })?;
                    requests.push(Request::Allocate {
                        process: process.to_string(),
                        size,
                    });
                }
                "RELEASE" => {
                    let process = fields.next().ok_or(TraceError::MissingField {
                        line,
                        field: "process name",
                    })?;
                    requests.push(Request::Release {
                        process: process.to_string(),
                    });
                }
                other => {
                    return Err(TraceError::UnknownDirective {
                        line,
                        directive: other.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            total_memory,
            requests,
        })
    }

    /// Reads and parses a request log from a file.
    pub fn from_file(path: &Path) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Number of `REQUEST` lines.
    pub fn num_allocations(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, Request::Allocate { .. }))
            .count()
    }

    /// Number of `RELEASE` lines.
    pub fn num_releases(&self) -> usize {
        self.requests.len() - self.num_allocations()
    }
}

/// Parses a strictly positive integer; `None` for zero or garbage.
fn parse_positive(s: &str) -> Option<u64> {
    match s.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_trace() {
        let trace = Trace::parse("1000\nREQUEST P1 300\nRELEASE P1\n").unwrap();
        assert_eq!(trace.total_memory, 1000);
        assert_eq!(
            trace.requests,
            vec![
                Request::Allocate {
                    process: "P1".into(),
                    size: 300
                },
                Request::Release {
                    process: "P1".into()
                },
            ]
        );
        assert_eq!(trace.num_allocations(), 1);
        assert_eq!(trace.num_releases(), 1);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_extra_whitespace() {
        let trace = Trace::parse("\n  1000  \n\n  REQUEST   P1\t300 \n\n").unwrap();
        assert_eq!(trace.total_memory, 1000);
        assert_eq!(trace.requests.len(), 1);
    }

    #[test]
    fn test_parse_ignores_trailing_tokens() {
        let trace = Trace::parse("1000\nREQUEST P1 300 extra tokens\n").unwrap();
        assert_eq!(
            trace.requests[0],
            Request::Allocate {
                process: "P1".into(),
                size: 300
            }
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(Trace::parse(""), Err(TraceError::MissingHeader)));
        assert!(matches!(
            Trace::parse("\n  \n"),
            Err(TraceError::MissingHeader)
        ));
    }

    #[test]
    fn test_parse_bad_header() {
        for header in ["abc", "0", "-5", "12.5"] {
            let input = format!("{header}\nREQUEST P1 100\n");
            assert!(
                matches!(
                    Trace::parse(&input),
                    Err(TraceError::InvalidTotalMemory { line: 1, .. })
                ),
                "header '{header}' should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_unknown_directive() {
        let err = Trace::parse("1000\nALLOC P1 100\n").unwrap_err();
        match err {
            TraceError::UnknownDirective { line, directive } => {
                assert_eq!(line, 2);
                assert_eq!(directive, "ALLOC");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_missing_fields() {
        assert!(matches!(
            Trace::parse("1000\nREQUEST\n"),
            Err(TraceError::MissingField { line: 2, .. })
        ));
        assert!(matches!(
            Trace::parse("1000\nREQUEST P1\n"),
            Err(TraceError::MissingField { line: 2, .. })
        ));
        assert!(matches!(
            Trace::parse("1000\nRELEASE\n"),
            Err(TraceError::MissingField { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_bad_size() {
        for size in ["abc", "0", "-1"] {
            let input = format!("1000\nREQUEST P1 {size}\n");
            assert!(
                matches!(
                    Trace::parse(&input),
                    Err(TraceError::InvalidSize { line: 2, .. })
                ),
                "size '{size}' should be rejected"
            );
        }
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let err = Trace::parse("1000\n\nBOGUS x\n").unwrap_err();
        assert!(matches!(err, TraceError::UnknownDirective { line: 3, .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Trace::from_file(Path::new("/nonexistent/trace.txt")).unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }
}
