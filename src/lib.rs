// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Lintbridge - run external compilers and linters over a buffer and
//! normalize their diagnostics.
//!
//! The entry point is [`ExternalLinterAdapter::lint`]: it writes the buffer
//! to a temporary file, runs the tool described by a [`LinterProfile`],
//! and maps what the tool prints into a [`ResultSet`] of 1-based spans.

pub mod adapter;
pub mod config;
pub mod parser;
pub mod utils;

use std::path::Path;
use thiserror::Error;

use adapter::Linter;

#[derive(Error, Debug)]
pub enum LintBridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Tool reported line {line}, but the buffer has {line_count} line(s)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("Unknown linter: {0}")]
    UnknownLinter(String),
}

pub type Result<T> = std::result::Result<T, LintBridgeError>;

/// Options for linting a file from disk
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Profile name; picked by file extension when unset
    pub linter: Option<String>,
    /// Encoding of the file on disk
    pub encoding: String,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            linter: None,
            encoding: "utf-8".to_string(),
        }
    }
}

/// Select the adapter for a file.
pub fn adapter_for(
    config: &config::Config,
    path: &Path,
    options: &LintOptions,
) -> Result<ExternalLinterAdapter> {
    let profile = match &options.linter {
        Some(name) => config.linter(name)?,
        None => config.linter_for_path(path).ok_or_else(|| {
            LintBridgeError::UnknownLinter(format!("no linter configured for {}", path.display()))
        })?,
    };
    Ok(ExternalLinterAdapter::new(profile.clone()))
}

/// Lint a file on disk as if it were an open buffer.
pub fn lint_path(linter: &dyn Linter, path: &Path, encoding: &str) -> Result<Option<ResultSet>> {
    let bytes = std::fs::read(path)?;
    let text = utils::encoding::decode_bytes(&bytes, encoding)?;
    let request = LintRequest::new(text, utils::display_name(path)).with_encoding(encoding);
    linter.lint(&request)
}

// Re-export commonly used types
pub use adapter::ExternalLinterAdapter;
pub use config::{Config, LinterProfile};
pub use utils::types::{LintRequest, LintResult, ResultSet, Severity, Span};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_adapter_for_by_extension() {
        let config = Config::built_in_defaults();
        let adapter = adapter_for(&config, Path::new("main.go"), &LintOptions::default()).unwrap();
        assert_eq!(adapter.profile().name, "go");
    }

    #[test]
    fn test_adapter_for_unknown_extension() {
        let config = Config::built_in_defaults();
        let err = adapter_for(&config, Path::new("main.py"), &LintOptions::default()).unwrap_err();
        assert!(matches!(err, LintBridgeError::UnknownLinter(_)));
    }

    #[test]
    fn test_adapter_for_explicit_linter() {
        let config = Config::built_in_defaults();
        let options = LintOptions {
            linter: Some("go".to_string()),
            ..Default::default()
        };
        let adapter = adapter_for(&config, Path::new("README"), &options).unwrap();
        assert_eq!(adapter.profile().program, "go");
    }

    #[test]
    fn test_lint_path_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.go");
        std::fs::write(&path, "\n\n").unwrap();

        let adapter = ExternalLinterAdapter::new(LinterProfile::go());
        assert!(lint_path(&adapter, &path, "utf-8").unwrap().is_none());
    }

    #[test]
    fn test_lint_path_missing_file() {
        let adapter = ExternalLinterAdapter::new(LinterProfile::go());
        let err = lint_path(&adapter, Path::new("/nonexistent/main.go"), "utf-8").unwrap_err();
        assert!(matches!(err, LintBridgeError::Io(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LintBridgeError::LineOutOfRange {
            line: 9,
            line_count: 3,
        };
        assert_eq!(err.to_string(), "Tool reported line 9, but the buffer has 3 line(s)");
    }
}
