// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Lintbridge CLI - lint files with external compilers and print normalized diagnostics.

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lintbridge::adapter::{ExternalLinterAdapter, Linter};
use lintbridge::utils::output::{format_reports, FileReport, OutputFormat};
use lintbridge::{adapter_for, lint_path, Config, LintOptions};

#[derive(Parser, Debug)]
#[command(name = "lintbridge")]
#[command(
    author,
    version,
    about = "Run external compilers and linters and normalize their diagnostics"
)]
struct Cli {
    /// Path to configuration file (toml, yaml or json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Lint files and print their diagnostics
    Lint {
        /// Files to lint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Linter profile to use (default: chosen by file extension)
        #[arg(short, long)]
        linter: Option<String>,

        /// Encoding of the files
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Output format: human, json, github-actions
        #[arg(short, long, default_value = "human")]
        output: String,
    },
    /// Check that configured tools are installed
    Check {
        /// Only check this linter profile
        #[arg(short, long)]
        linter: Option<String>,
    },
    /// Initialize .lintbridge/config.toml in the current directory
    Init {
        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;

    match cli.command {
        Commands::Init { force } => handle_init(&cwd, force),
        Commands::Lint {
            files,
            linter,
            encoding,
            output,
        } => {
            let format = match OutputFormat::parse(&output) {
                Some(f) => f,
                None => bail!("Unknown output format: {}", output),
            };
            let config = load_config(&cwd, cli.config.as_deref())?;
            let options = LintOptions { linter, encoding };
            handle_lint(&config, &files, &options, format)
        }
        Commands::Check { linter } => {
            let config = load_config(&cwd, cli.config.as_deref())?;
            handle_check(&config, linter.as_deref())
        }
    }
}

fn load_config(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_merged(cwd, explicit).context("Failed to load configuration")
}

fn handle_lint(
    config: &Config,
    files: &[PathBuf],
    options: &LintOptions,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut reports = Vec::new();

    for file in files {
        let adapter = adapter_for(config, file, options)
            .with_context(|| format!("Cannot lint {}", file.display()))?;
        let results = lint_path(&adapter, file, &options.encoding)
            .with_context(|| format!("Failed to lint {}", file.display()))?;

        match results {
            Some(results) => reports.push(FileReport {
                file: file.display().to_string(),
                linter: adapter.name().to_string(),
                results,
            }),
            None => log::debug!("Skipping blank file {}", file.display()),
        }
    }

    println!("{}", format_reports(&reports, format));

    if reports.iter().any(|r| r.results.has_errors()) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn handle_check(config: &Config, only: Option<&str>) -> anyhow::Result<ExitCode> {
    let profiles = match only {
        Some(name) => vec![config.linter(name)?],
        None => config.linters.values().collect(),
    };

    let mut missing = 0;
    for profile in profiles {
        let adapter = ExternalLinterAdapter::new(profile.clone());
        if adapter.is_available() {
            println!("{} {} ({})", "✓".green(), profile.name.bold(), profile.program);
        } else {
            missing += 1;
            println!(
                "{} {} ({} not found)",
                "✗".red(),
                profile.name.bold(),
                profile.program
            );
        }
    }

    Ok(if missing == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn handle_init(cwd: &Path, force: bool) -> anyhow::Result<ExitCode> {
    let config_path = Config::project_config_path(cwd);

    if config_path.exists() && !force {
        eprintln!(
            "{}: {} already exists (use --force to overwrite)",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::from(1));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&config_path, Config::generate_default_toml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{} Created {}", "✓".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
