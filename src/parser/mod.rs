// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Parsers for the diagnostic line formats emitted by external tools.
//!
//! Two formats are understood:
//!
//! - `with-column`: `<file>:<line>:<col>: <message>`, e.g.
//!   `hello.go:5:5: import "appengine/datastore": cannot find package`
//! - `no-column`: `<file>:<line>: <message>`, e.g.
//!   `hello.go:9: imported and not used: "time"`
//!
//! Lines that don't match still produce a result, without a position.

pub mod source;

pub use source::SourceLines;

use crate::utils::types::{LintResult, Severity, Span};
use crate::{LintBridgeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shape of the diagnostic lines a tool prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticFormat {
    /// `<file>:<line>:<col>: <message>`
    WithColumn,
    /// `<file>:<line>: <message>`
    NoColumn,
}

impl DiagnosticFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticFormat::WithColumn => "with-column",
            DiagnosticFormat::NoColumn => "no-column",
        }
    }
}

/// Parses tool output lines that refer to one display filename.
pub struct DiagnosticParser<'a> {
    format: DiagnosticFormat,
    severity: Severity,
    source: &'a SourceLines<'a>,
    pattern: Regex,
}

impl<'a> DiagnosticParser<'a> {
    pub fn new(
        format: DiagnosticFormat,
        severity: Severity,
        display_name: &str,
        source: &'a SourceLines<'a>,
    ) -> Result<Self> {
        let file = regex::escape(display_name);
        let pattern = match format {
            DiagnosticFormat::WithColumn => {
                format!(r"^{}:(?P<line_no>\d+):(?P<col_no>\d+): (?P<message>.*)", file)
            }
            DiagnosticFormat::NoColumn => {
                format!(r"^{}:(?P<line_no>\d+): (?P<message>.*)", file)
            }
        };
        let pattern = Regex::new(&pattern).map_err(|e| {
            LintBridgeError::Config(format!("Invalid diagnostic pattern: {}", e))
        })?;

        Ok(Self {
            format,
            severity,
            source,
            pattern,
        })
    }

    /// Turn one output line into a result.
    ///
    /// Returns an error only when the tool names a line outside the buffer.
    pub fn parse_line(&self, line: &str) -> Result<LintResult> {
        let caps = match self.pattern.captures(line) {
            Some(caps) => caps,
            None => return Ok(LintResult::new(self.severity, line.trim())),
        };

        let message = caps.name("message").map_or("", |m| m.as_str());
        let line_no = match parse_number(caps.name("line_no").map(|m| m.as_str())) {
            Some(n) => n,
            None => return Ok(LintResult::new(self.severity, line.trim())),
        };

        let span = match self.format {
            DiagnosticFormat::WithColumn => {
                let col = match parse_number(caps.name("col_no").map(|m| m.as_str())) {
                    Some(n) => n,
                    None => return Ok(LintResult::new(self.severity, line.trim())),
                };
                // Column end marks where the line's content stops
                let content = self.source.trimmed_line(line_no)?;
                Span::single_line(line_no, col, content.len())
            }
            DiagnosticFormat::NoColumn => {
                let content = self.source.trimmed_line(line_no)?;
                let indent = content.len() - content.trim_ascii_start().len();
                Span::single_line(line_no, indent + 1, content.len() + 1)
            }
        };

        log::debug!("Parsed [{}] as {:?}", line, span);
        Ok(LintResult::new(self.severity, message).with_span(span))
    }
}

/// Digits that overflow `usize` are treated as a non-match.
fn parse_number(digits: Option<&str>) -> Option<usize> {
    digits.and_then(|d| d.parse::<usize>().ok())
}
