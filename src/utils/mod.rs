// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Utility modules for lintbridge.

pub mod encoding;
pub mod output;
pub mod types;

use std::path::Path;

/// Name a file is shown under in diagnostics: its base name.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_base_name() {
        assert_eq!(display_name(Path::new("/work/cmd/main.go")), "main.go");
        assert_eq!(display_name(Path::new("main.go")), "main.go");
    }
}
