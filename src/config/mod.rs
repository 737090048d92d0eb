// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Configuration system for lintbridge with hierarchical precedence.
//!
//! Configuration is loaded and merged from multiple sources with the following precedence
//! (higher precedence overrides lower):
//!
//! 1. Config file given on the command line (highest)
//! 2. Project config (.lintbridge/config.toml in project root or a parent)
//! 3. User config (~/.lintbridge/config.toml)
//! 4. Built-in profiles (lowest)

pub mod profile;

pub use profile::{ExitCodeRule, LinterProfile, Stream};

use crate::{LintBridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Linter profiles keyed by name
    #[serde(default, alias = "linter")]
    pub linters: BTreeMap<String, LinterProfile>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LintBridgeError::Config(format!("Failed to read config: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Config = match ext {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .map_err(|e| LintBridgeError::Config(format!("Failed to parse YAML: {}", e)))?,
            "toml" => toml::from_str(&content)
                .map_err(|e| LintBridgeError::Config(format!("Failed to parse TOML: {}", e)))?,
            "json" => serde_json::from_str(&content)
                .map_err(|e| LintBridgeError::Config(format!("Failed to parse JSON: {}", e)))?,
            _ => {
                return Err(LintBridgeError::Config(format!(
                    "Unsupported config format: {}",
                    ext
                )))
            }
        };

        log::debug!("Loaded config from {}", path.display());
        Ok(config.with_profile_names())
    }

    /// Built-in configuration: the shipped linter profiles
    pub fn built_in_defaults() -> Self {
        Config {
            linters: LinterProfile::built_ins()
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    /// Load user-level configuration from ~/.lintbridge/config.toml
    pub fn load_user_config() -> Option<Self> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".lintbridge").join("config.toml");
        if config_path.exists() {
            load_or_warn(&config_path)
        } else {
            None
        }
    }

    /// Load project-level configuration from the given directory
    /// Searches for .lintbridge/config.toml in the start directory and parent directories
    pub fn load_project_config(start_dir: &Path) -> Option<Self> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = Self::project_config_path(&current);
            if config_path.exists() {
                if let Some(config) = load_or_warn(&config_path) {
                    return Some(config);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Merge another configuration into this one.
    /// A profile in `other` replaces the one with the same name wholesale.
    pub fn merge(&mut self, other: Config) {
        self.linters.extend(other.linters);
    }

    /// Load and merge configuration from all sources with proper precedence.
    /// Precedence: explicit file > project > user > built-in
    pub fn load_merged(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::built_in_defaults();

        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(project_dir) {
            config.merge(project_config);
        }

        // An explicitly requested file must load
        if let Some(path) = explicit {
            config.merge(Self::load(path)?);
        }

        Ok(config)
    }

    /// Look up a profile by name
    pub fn linter(&self, name: &str) -> Result<&LinterProfile> {
        self.linters
            .get(name)
            .ok_or_else(|| LintBridgeError::UnknownLinter(name.to_string()))
    }

    /// Pick the profile that lints the given file, by extension
    pub fn linter_for_path(&self, path: &Path) -> Option<&LinterProfile> {
        self.linters.values().find(|p| p.matches_path(path))
    }

    /// Generate a default configuration file content
    pub fn generate_default_toml() -> String {
        r#"# Lintbridge Configuration
# Each [linters.<name>] table describes one external tool.
# "{source}" and "{dest}" in args are replaced by temporary file paths.

[linters.go]
program = "go"
args = ["build", "-o", "{dest}", "{source}"]
source_suffix = ".go"
extensions = ["go"]

# go build: type errors on stderr as file:line:col: message
[[linters.go.exit_codes]]
code = 1
stream = "stderr"
format = "with-column"
skip_lines = 0

# go build: build errors on stdout as file:line: message, after a header
[[linters.go.exit_codes]]
code = 2
stream = "stdout"
format = "no-column"
skip_lines = 1

# [linters.go.env]
# GOFLAGS = "-mod=mod"
"#
        .to_string()
    }

    /// Get the path for a project config file
    pub fn project_config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".lintbridge").join("config.toml")
    }

    /// Fill in profile names from their table keys
    fn with_profile_names(mut self) -> Self {
        for (name, profile) in self.linters.iter_mut() {
            if profile.name.is_empty() {
                profile.name = name.clone();
            }
        }
        self
    }
}

fn load_or_warn(path: &Path) -> Option<Config> {
    match Config::load(path) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

/// Home directory lookup from the environment
mod dirs {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        std::env::var("HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
    }
}
