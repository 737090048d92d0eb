// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! External linter adapter.
//!
//! Runs a compiler or linter over a buffer and normalizes what it prints:
//! write the buffer to a temp file, run the tool, classify the exit code,
//! parse the selected output stream line by line, remove the temp files.

pub mod process;
pub mod traits;
pub mod workspace;

pub use process::{CommandRunner, EnvSnapshot, ProcessOutput, ProcessSpec, SystemRunner};
pub use traits::Linter;
pub use workspace::TempWorkspace;

use crate::config::{ExitCodeRule, LinterProfile, Stream};
use crate::parser::{DiagnosticParser, SourceLines};
use crate::utils::encoding::encode_text;
use crate::utils::types::{LintRequest, LintResult, ResultSet};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Description of the catch-all diagnostic for unclassified failures
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Adapter that lints buffers with one external tool.
#[derive(Debug)]
pub struct ExternalLinterAdapter {
    profile: LinterProfile,
    runner: Arc<dyn CommandRunner>,
}

impl ExternalLinterAdapter {
    /// Adapter that spawns real processes.
    pub fn new(profile: LinterProfile) -> Self {
        Self::with_runner(profile, Arc::new(SystemRunner))
    }

    pub fn with_runner(profile: LinterProfile, runner: Arc<dyn CommandRunner>) -> Self {
        Self { profile, runner }
    }

    pub fn profile(&self) -> &LinterProfile {
        &self.profile
    }

    /// Probe for the tool's binary.
    ///
    /// A missing binary is logged rather than raised; lint calls will then
    /// log the failure and return no diagnostics.
    pub fn check_tool_available(&self) -> bool {
        let spec = ProcessSpec {
            program: self.profile.program.clone(),
            args: self.profile.probe_args.clone(),
            env: self.environment(),
        };
        match self.runner.run(&spec) {
            Ok(_) => true,
            Err(e) => {
                log::error!("\"{}\" binary not found: {}", self.profile.program, e);
                false
            }
        }
    }

    /// Lint a buffer.
    ///
    /// Returns `Ok(None)` for a blank buffer without running the tool.
    pub fn lint(&self, request: &LintRequest) -> Result<Option<ResultSet>> {
        log::debug!(
            "Request: [{}] ({} bytes, {})",
            request.display_name,
            request.text.len(),
            request.encoding
        );
        if request.is_blank() {
            return Ok(None);
        }

        let text = encode_text(&request.text, &request.encoding)?;
        self.lint_text(request, &text).map(Some)
    }

    /// Lint already-encoded buffer contents.
    ///
    /// The temporary files are removed on every return path.
    pub fn lint_text(&self, request: &LintRequest, text: &[u8]) -> Result<ResultSet> {
        let workspace = TempWorkspace::create(&self.profile, text)?;
        let spec = ProcessSpec {
            program: self.profile.program.clone(),
            args: self
                .profile
                .command_args(workspace.source_path(), workspace.dest_path()),
            env: self.environment(),
        };

        log::info!("Running {}", spec.display());
        let output = match self.runner.run(&spec) {
            Ok(output) => output,
            Err(e) => {
                log::error!("Failed to run {}: {}", self.profile.program, e);
                return Ok(ResultSet::new());
            }
        };
        log::debug!(
            "Exit code: {:?}, stdout: [{}], stderr: [{}]",
            output.exit_code,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        let results = self.collect_results(request, workspace.source_path(), text, &output)?;
        log::debug!("Results: {} diagnostic(s)", results.len());
        Ok(results)
    }

    fn collect_results(
        &self,
        request: &LintRequest,
        source_path: &Path,
        text: &[u8],
        output: &ProcessOutput,
    ) -> Result<ResultSet> {
        let mut results = ResultSet::new();

        let code = match output.exit_code {
            Some(0) => return Ok(results),
            Some(code) => code,
            None => {
                log::warn!("{} terminated without an exit code", self.profile.program);
                results.add_result(LintResult::error(UNEXPECTED_ERROR));
                return Ok(results);
            }
        };

        let rule = match self.profile.rule_for(code) {
            Some(rule) => rule,
            None => {
                log::warn!("{} exited with unclassified code {}", self.profile.program, code);
                results.add_result(LintResult::error(UNEXPECTED_ERROR));
                return Ok(results);
            }
        };

        let captured = select_stream(rule, output);
        if captured.is_empty() {
            results.add_result(LintResult::error(UNEXPECTED_ERROR));
            return Ok(results);
        }

        // The tool names the temp file; the user knows the buffer by its display name
        let captured = String::from_utf8_lossy(captured)
            .replace(source_path.to_string_lossy().as_ref(), &request.display_name);

        let source = SourceLines::new(text);
        let parser =
            DiagnosticParser::new(rule.format, rule.severity, &request.display_name, &source)?;
        for line in captured.lines().skip(rule.skip_lines) {
            log::debug!("Diagnostic line: [{}]", line);
            results.add_result(parser.parse_line(line)?);
        }

        Ok(results)
    }

    fn environment(&self) -> EnvSnapshot {
        EnvSnapshot::capture().with_overrides(&self.profile.env)
    }
}

fn select_stream<'o>(rule: &ExitCodeRule, output: &'o ProcessOutput) -> &'o [u8] {
    match rule.stream {
        Stream::Stdout => &output.stdout,
        Stream::Stderr => &output.stderr,
    }
}

impl Linter for ExternalLinterAdapter {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn extensions(&self) -> &[String] {
        &self.profile.extensions
    }

    fn lint(&self, request: &LintRequest) -> Result<Option<ResultSet>> {
        ExternalLinterAdapter::lint(self, request)
    }

    fn supports(&self, path: &Path) -> bool {
        self.profile.matches_path(path)
    }

    fn is_available(&self) -> bool {
        self.check_tool_available()
    }
}
