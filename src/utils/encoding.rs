// Copyright 2024 zhlinh and linthis Project Authors. All rights reserved.
// Use of this source code is governed by a MIT-style
// license that can be found at
//
// https://opensource.org/license/MIT
//
// The above copyright notice and this permission
// notice shall be included in all copies or
// substantial portions of the Software.

//! Encoding of buffer text into the bytes handed to external tools.
//!
//! Only encodings where a newline is the single byte `0x0A` are accepted, so
//! diagnostics can be mapped back to lines and byte columns of the buffer.

use crate::{LintBridgeError, Result};

/// Encodings a buffer may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Ascii,
    Latin1,
}

impl TextEncoding {
    /// Resolve an encoding label, ignoring case and `_`/`-` differences.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Some(TextEncoding::Utf8),
            "ascii" | "us-ascii" => Some(TextEncoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Some(TextEncoding::Latin1),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Highest code point representable, for single-byte encodings.
    fn max_code_point(&self) -> Option<u32> {
        match self {
            TextEncoding::Ascii => Some(0x7F),
            TextEncoding::Latin1 => Some(0xFF),
            TextEncoding::Utf8 => None,
        }
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Ascii | TextEncoding::Latin1 => {
                let max = self.max_code_point().unwrap_or(0x7F);
                text.chars()
                    .map(|c| {
                        let cp = c as u32;
                        if cp <= max {
                            Ok(cp as u8)
                        } else {
                            Err(LintBridgeError::Encoding(format!(
                                "character {:?} (U+{:04X}) cannot be encoded as {}",
                                c,
                                cp,
                                self.name()
                            )))
                        }
                    })
                    .collect()
            }
        }
    }

    /// Decode bytes read from disk, replacing invalid sequences.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 | TextEncoding::Ascii => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

fn lookup(name: &str) -> Result<TextEncoding> {
    TextEncoding::from_name(name)
        .ok_or_else(|| LintBridgeError::Encoding(format!("Unknown encoding: {}", name)))
}

/// Encode `text` using the encoding called `name`.
pub fn encode_text(text: &str, name: &str) -> Result<Vec<u8>> {
    let encoding = lookup(name)?;
    encoding.encode(text)
}

/// Decode `bytes` using the encoding called `name`.
pub fn decode_bytes(bytes: &[u8], name: &str) -> Result<String> {
    let encoding = lookup(name)?;
    Ok(encoding.decode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(TextEncoding::from_name("UTF-8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_name("utf_8"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::from_name("ISO-8859-1"), Some(TextEncoding::Latin1));
        assert_eq!(TextEncoding::from_name("us-ascii"), Some(TextEncoding::Ascii));
        assert_eq!(TextEncoding::from_name("ebcdic"), None);
    }

    #[test]
    fn test_encode_utf8_passthrough() {
        assert_eq!(encode_text("héllo", "utf-8").unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_encode_latin1_single_byte() {
        assert_eq!(encode_text("héllo", "latin-1").unwrap(), vec![b'h', 0xE9, b'l', b'l', b'o']);
    }

    #[test]
    fn test_encode_ascii_rejects_non_ascii() {
        let err = encode_text("héllo", "ascii").unwrap_err();
        assert!(matches!(err, LintBridgeError::Encoding(_)));
        assert!(err.to_string().contains("U+00E9"));
    }

    #[test]
    fn test_utf16_is_not_accepted() {
        for name in ["utf-16le", "utf-16be", "UTF-16"] {
            assert_eq!(TextEncoding::from_name(name), None);
            assert!(matches!(encode_text("a\nb\n", name), Err(LintBridgeError::Encoding(_))));
            assert!(decode_bytes(&[b'a', 0], name).is_err());
        }
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_bytes(&[b'c', b'a', b'f', 0xE9], "latin1").unwrap(), "café");
    }

    #[test]
    fn test_unknown_encoding_is_error() {
        let err = encode_text("x", "klingon").unwrap_err();
        assert!(err.to_string().contains("Unknown encoding: klingon"));
    }
}
