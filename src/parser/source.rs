// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! 1-based line lookup over the encoded buffer.

use crate::{LintBridgeError, Result};

/// The lines of the buffer as handed to the tool.
///
/// Works on bytes because the buffer may be in a non-UTF-8 encoding and
/// columns are byte offsets.
pub struct SourceLines<'a> {
    lines: Vec<&'a [u8]>,
}

impl<'a> SourceLines<'a> {
    /// Split on `\n`, `\r\n` or a bare `\r`.
    pub fn new(text: &'a [u8]) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < text.len() {
            match text[i] {
                b'\n' => {
                    lines.push(&text[start..i]);
                    start = i + 1;
                }
                b'\r' => {
                    lines.push(&text[start..i]);
                    if text.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        // A trailing terminator ends the last line rather than starting a new one
        if start < text.len() {
            lines.push(&text[start..]);
        }
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get line `line_no` (1-indexed), failing on anything outside the buffer.
    pub fn line(&self, line_no: usize) -> Result<&'a [u8]> {
        if line_no == 0 || line_no > self.lines.len() {
            return Err(LintBridgeError::LineOutOfRange {
                line: line_no,
                line_count: self.lines.len(),
            });
        }
        Ok(self.lines[line_no - 1])
    }

    /// Get line `line_no` with trailing whitespace removed.
    pub fn trimmed_line(&self, line_no: usize) -> Result<&'a [u8]> {
        self.line(line_no).map(|line| line.trim_ascii_end())
    }
}
