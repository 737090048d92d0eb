// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Temporary files for a single lint call.

use crate::config::LinterProfile;
use crate::{LintBridgeError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, TempPath};

/// Source and destination files for one tool invocation.
///
/// Both files live in the system temp directory and are removed when the
/// workspace is dropped. Removal errors are ignored: the tool may have
/// deleted or replaced the destination.
pub struct TempWorkspace {
    source: TempPath,
    dest: TempPath,
}

impl TempWorkspace {
    /// Create the files and write `contents` to the source file.
    ///
    /// The source file handle is closed before returning so the tool can
    /// open it.
    pub fn create(profile: &LinterProfile, contents: &[u8]) -> Result<Self> {
        let mut source = Builder::new()
            .prefix(&profile.source_prefix)
            .suffix(&profile.source_suffix)
            .tempfile()
            .map_err(|e| LintBridgeError::Io(with_context(e, "create temporary source file")))?;
        source
            .write_all(contents)
            .and_then(|_| source.flush())
            .map_err(|e| LintBridgeError::Io(with_context(e, "write temporary source file")))?;
        let source = source.into_temp_path();

        let dest = Builder::new()
            .prefix(&profile.source_prefix)
            .suffix(".out")
            .tempfile()
            .map_err(|e| {
                LintBridgeError::Io(with_context(e, "create temporary destination file"))
            })?
            .into_temp_path();

        Ok(Self { source, dest })
    }

    pub fn source_path(&self) -> &Path {
        &self.source
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest
    }
}

fn with_context(e: std::io::Error, what: &str) -> std::io::Error {
    std::io::Error::new(e.kind(), format!("Failed to {}: {}", what, e))
}
