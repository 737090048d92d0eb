// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Subprocess execution behind a trait so the adapter can be driven without
//! a real toolchain.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// Snapshot of the environment a tool runs with.
///
/// Names and values are kept as OS strings so non-UTF-8 entries reach the
/// tool unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Layer variables over the snapshot, replacing existing ones.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (k, v) in overrides {
            self.vars.insert(OsString::from(k), OsString::from(v));
        }
        self
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter()
    }
}

/// A fully-resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: EnvSnapshot,
}

impl ProcessSpec {
    /// Command line for logging
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// None when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs a process to completion and captures its output.
pub trait CommandRunner: Send + Sync + fmt::Debug {
    /// Run `spec`, blocking until it exits.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&self, spec: &ProcessSpec) -> io::Result<ProcessOutput>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &ProcessSpec) -> io::Result<ProcessOutput> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .env_clear()
            .envs(spec.env.iter())
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_replace() {
        let mut overrides = BTreeMap::new();
        overrides.insert("GOFLAGS".to_string(), "-mod=mod".to_string());
        let env = EnvSnapshot::empty().with_overrides(&overrides);
        assert_eq!(env.get("GOFLAGS"), Some(OsStr::new("-mod=mod")));
        assert_eq!(env.get("PATH"), None);
    }

    #[test]
    fn test_capture_sees_process_env() {
        // PATH is set in any environment able to run the test binary
        let env = EnvSnapshot::capture();
        assert_eq!(env.get("PATH").map(OsStr::to_os_string), std::env::var_os("PATH"));
    }

    #[test]
    fn test_spec_display() {
        let spec = ProcessSpec {
            program: "go".to_string(),
            args: vec!["build".to_string(), "x.go".to_string()],
            env: EnvSnapshot::empty(),
        };
        assert_eq!(spec.display(), "go build x.go");
    }

    #[test]
    fn test_system_runner_missing_binary() {
        let spec = ProcessSpec {
            program: "lintbridge-definitely-not-installed".to_string(),
            args: Vec::new(),
            env: EnvSnapshot::capture(),
        };
        let err = SystemRunner.run(&spec).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_streams_and_code() {
        let spec = ProcessSpec {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo out; echo err >&2; echo $LB_TEST; exit 3".to_string(),
            ],
            env: EnvSnapshot::capture().with_overrides(
                &[("LB_TEST".to_string(), "set".to_string())].into_iter().collect(),
            ),
        };
        let output = SystemRunner.run(&spec).unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout), "out\nset\n");
        assert_eq!(String::from_utf8_lossy(&output.stderr), "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variable_reaches_tool_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let value = OsStr::from_bytes(b"/opt/caf\xE9/bin");
        std::env::set_var("LINTBRIDGE_TEST_NON_UTF8", value);

        let env = EnvSnapshot::capture();
        assert_eq!(env.get("LINTBRIDGE_TEST_NON_UTF8"), Some(value));

        let spec = ProcessSpec {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "printf '%s' \"$LINTBRIDGE_TEST_NON_UTF8\"".to_string(),
            ],
            env,
        };
        let output = SystemRunner.run(&spec).unwrap();
        std::env::remove_var("LINTBRIDGE_TEST_NON_UTF8");

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout, b"/opt/caf\xE9/bin");
    }
}
