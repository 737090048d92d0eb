// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Linter profiles: how to invoke one external tool and read its output.

use crate::parser::DiagnosticFormat;
use crate::utils::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder replaced by the temporary source file path
pub const SOURCE_PLACEHOLDER: &str = "{source}";
/// Placeholder replaced by the temporary destination file path
pub const DEST_PLACEHOLDER: &str = "{dest}";

/// Which captured stream holds the diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// How to read the output for one exit code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitCodeRule {
    /// Process exit code this rule applies to
    pub code: i32,
    /// Stream to parse
    pub stream: Stream,
    /// Line format of the diagnostics
    pub format: DiagnosticFormat,
    /// Header lines to skip before parsing
    #[serde(default)]
    pub skip_lines: usize,
    /// Severity given to every result
    #[serde(default)]
    pub severity: Severity,
}

/// Command template and output rules for one external tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterProfile {
    /// Profile name (e.g., "go")
    #[serde(default)]
    pub name: String,
    /// Executable, resolved through PATH
    pub program: String,
    /// Arguments; `{source}` and `{dest}` are substituted per call
    #[serde(default)]
    pub args: Vec<String>,
    /// Arguments used when probing for the binary
    #[serde(default)]
    pub probe_args: Vec<String>,
    /// Prefix for the temporary source file name
    #[serde(default = "default_source_prefix")]
    pub source_prefix: String,
    /// Suffix for the temporary source file name (e.g., ".go")
    #[serde(default)]
    pub source_suffix: String,
    /// File extensions this profile lints, without the dot
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Extra environment variables layered over the captured environment
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Exit code classification
    #[serde(default)]
    pub exit_codes: Vec<ExitCodeRule>,
}

fn default_source_prefix() -> String {
    "lintbridge".to_string()
}

impl LinterProfile {
    pub fn new(name: &str, program: &str) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: Vec::new(),
            probe_args: Vec::new(),
            source_prefix: default_source_prefix(),
            source_suffix: String::new(),
            extensions: Vec::new(),
            env: BTreeMap::new(),
            exit_codes: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_suffix(mut self, suffix: &str) -> Self {
        self.source_suffix = suffix.to_string();
        self
    }

    pub fn with_extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_string());
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_rule(mut self, rule: ExitCodeRule) -> Self {
        self.exit_codes.push(rule);
        self
    }

    /// The Go compiler profile: `go build -o <dest> <source>`.
    ///
    /// Exit code 1 reports `file:line:col: msg` on stderr, exit code 2
    /// reports `file:line: msg` on stdout after a header line.
    pub fn go() -> Self {
        Self::new("go", "go")
            .with_args(["build", "-o", DEST_PLACEHOLDER, SOURCE_PLACEHOLDER])
            .with_source_suffix(".go")
            .with_extension("go")
            .with_rule(ExitCodeRule {
                code: 1,
                stream: Stream::Stderr,
                format: DiagnosticFormat::WithColumn,
                skip_lines: 0,
                severity: Severity::Error,
            })
            .with_rule(ExitCodeRule {
                code: 2,
                stream: Stream::Stdout,
                format: DiagnosticFormat::NoColumn,
                skip_lines: 1,
                severity: Severity::Error,
            })
    }

    /// Profiles shipped with the crate.
    pub fn built_ins() -> Vec<Self> {
        vec![Self::go()]
    }

    /// Find the rule for an exit code.
    pub fn rule_for(&self, code: i32) -> Option<&ExitCodeRule> {
        self.exit_codes.iter().find(|rule| rule.code == code)
    }

    /// Build the argument vector for one call.
    pub fn command_args(&self, source: &Path, dest: &Path) -> Vec<String> {
        let source = source.to_string_lossy();
        let dest = dest.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(SOURCE_PLACEHOLDER, &source)
                    .replace(DEST_PLACEHOLDER, &dest)
            })
            .collect()
    }

    /// Check if this profile lints files with the given path's extension.
    pub fn matches_path(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }
}

/// Case-insensitive extension match; entries may be written with a leading dot.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
