// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Output formatting utilities for lint results.

use crate::utils::types::{LintResult, ResultSet, Severity};
use colored::Colorize;
use serde::Serialize;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    GithubActions,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(OutputFormat::Human),
            "json" => Some(OutputFormat::Json),
            "github-actions" | "github" | "ga" => Some(OutputFormat::GithubActions),
            _ => None,
        }
    }
}

/// Results for one linted file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub linter: String,
    pub results: ResultSet,
}

/// Format a single result for human-readable output.
pub fn format_result_human(file: &str, result: &LintResult) -> String {
    let severity_str = match result.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };

    let location = match result.span {
        Some(span) => format!("{}:{}:{}", file, span.line_start, span.column_start),
        None => file.to_string(),
    };

    format!("{}: {}: {}", location.bold(), severity_str, result.description)
}

/// Format a single result for GitHub Actions output.
pub fn format_result_github_actions(file: &str, result: &LintResult) -> String {
    let severity = match result.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };

    let position = result
        .span
        .map(|s| {
            format!(
                ",line={},endLine={},col={},endColumn={}",
                s.line_start, s.line_end, s.column_start, s.column_end
            )
        })
        .unwrap_or_default();

    format!("::{} file={}{}::{}", severity, file, position, result.description)
}

/// Summary line across all reports.
pub fn format_summary_human(reports: &[FileReport]) -> String {
    let errors: usize = reports.iter().map(|r| r.results.count(Severity::Error)).sum();
    let warnings: usize = reports.iter().map(|r| r.results.count(Severity::Warning)).sum();
    let files_with_results = reports.iter().filter(|r| !r.results.is_empty()).count();

    if errors + warnings == 0 {
        return format!("{}", "No diagnostics".green().bold());
    }

    format!(
        "{} {} error{}, {} warning{} in {} file{}",
        "✗".red(),
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
        files_with_results,
        if files_with_results == 1 { "" } else { "s" }
    )
}

/// Format all reports for human-readable output.
pub fn format_reports_human(reports: &[FileReport]) -> String {
    let mut output = String::new();

    for report in reports {
        for result in &report.results {
            output.push_str(&format_result_human(&report.file, result));
            output.push('\n');
        }
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&format_summary_human(reports));

    output
}

/// Format all reports as JSON.
pub fn format_reports_json(reports: &[FileReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Format all reports for GitHub Actions.
pub fn format_reports_github_actions(reports: &[FileReport]) -> String {
    reports
        .iter()
        .flat_map(|report| {
            report
                .results
                .iter()
                .map(move |result| format_result_github_actions(&report.file, result))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format reports according to the specified output format.
pub fn format_reports(reports: &[FileReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_reports_human(reports),
        OutputFormat::Json => format_reports_json(reports),
        OutputFormat::GithubActions => format_reports_github_actions(reports),
    }
}
