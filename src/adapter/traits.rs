// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Linter trait definition for buffer linters.

use crate::config::profile::has_extension;
use crate::utils::types::{LintRequest, ResultSet};
use crate::Result;
use std::path::Path;

/// Trait for implementing buffer linters.
///
/// Each implementation should shell out to an external tool and parse its
/// output into a normalized ResultSet.
pub trait Linter: Send + Sync {
    /// Returns the name of this linter (e.g., "go").
    fn name(&self) -> &str;

    /// Returns the file extensions this linter handles, without the dot.
    fn extensions(&self) -> &[String];

    /// Lint one buffer.
    ///
    /// # Returns
    /// `None` if the buffer is blank and the tool was not run, otherwise
    /// the diagnostics in the order the tool reported them.
    fn lint(&self, request: &LintRequest) -> Result<Option<ResultSet>>;

    /// Check if this linter handles the given file.
    fn supports(&self, path: &Path) -> bool {
        has_extension(path, self.extensions())
    }

    /// Check if the external tool is available.
    fn is_available(&self) -> bool;
}
