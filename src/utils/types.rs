// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Core types for lint requests and normalized results.

use serde::{Deserialize, Serialize};

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Location of a diagnostic in the source buffer.
///
/// All fields are 1-based. Columns are byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line_start: usize,
    pub line_end: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl Span {
    /// A span covering columns of a single line.
    pub fn single_line(line: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            line_start: line,
            line_end: line,
            column_start,
            column_end,
        }
    }
}

/// A single normalized diagnostic.
///
/// A result without a span is a positionless diagnostic: the tool reported
/// something that could not be tied to a location in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    pub severity: Severity,
    /// Human-readable description
    pub description: String,
    /// Location in the buffer, if the tool output could be parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl LintResult {
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
            span: None,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(Severity::Error, description)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn is_positionless(&self) -> bool {
        self.span.is_none()
    }
}

/// Ordered sequence of results, in the order the tool reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    results: Vec<LintResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: LintResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LintResult> {
        self.results.iter()
    }

    pub fn results(&self) -> &[LintResult] {
        &self.results
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl IntoIterator for ResultSet {
    type Item = LintResult;
    type IntoIter = std::vec::IntoIter<LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a LintResult;
    type IntoIter = std::slice::Iter<'a, LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<LintResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = LintResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// A single lint invocation for one buffer.
#[derive(Debug, Clone)]
pub struct LintRequest {
    /// Buffer contents
    pub text: String,
    /// Encoding the buffer is written to disk in (e.g. "utf-8")
    pub encoding: String,
    /// Name the user knows the buffer by; replaces temp paths in tool output
    pub display_name: String,
}

impl LintRequest {
    pub fn new(text: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encoding: "utf-8".to_string(),
            display_name: display_name.into(),
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// True when there is nothing worth handing to the tool.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
