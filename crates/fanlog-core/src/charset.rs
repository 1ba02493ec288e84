//! Text encodings used when measuring and writing log lines

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Charset a destination encodes its lines with.
///
/// Labels are resolved the way browsers resolve them (`"latin1"` means
/// windows-1252). encoding_rs only decodes UTF-16, so the two UTF-16 byte
/// orders are encoded here directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    Utf16Le,
    Utf16Be,
    Standard(&'static Encoding),
}

impl Charset {
    pub fn utf8() -> Charset {
        Charset::Standard(encoding_rs::UTF_8)
    }

    /// Resolve a charset from a label such as `"utf-8"` or `"shift_jis"`
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::UnknownCharset(label.to_string()))?;

        if encoding == encoding_rs::UTF_16LE {
            return Ok(Charset::Utf16Le);
        }
        if encoding == encoding_rs::UTF_16BE {
            return Ok(Charset::Utf16Be);
        }
        // "replacement" and friends cannot produce their own bytes
        if encoding.output_encoding() != encoding {
            return Err(Error::UnknownCharset(label.to_string()));
        }
        Ok(Charset::Standard(encoding))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Standard(encoding) => encoding.name(),
        }
    }

    /// Encode `text`, failing if any character has no mapping
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        match self {
            Charset::Utf16Le => Ok(Cow::Owned(
                text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            )),
            Charset::Utf16Be => Ok(Cow::Owned(
                text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            )),
            Charset::Standard(encoding) => {
                let (bytes, _, had_unmappable) = encoding.encode(text);
                if had_unmappable {
                    return Err(Error::encoding(encoding.name()));
                }
                Ok(bytes)
            }
        }
    }

    /// Decode bytes previously written with this charset, replacing malformed input
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let encoding = match self {
            Charset::Utf16Le => encoding_rs::UTF_16LE,
            Charset::Utf16Be => encoding_rs::UTF_16BE,
            Charset::Standard(encoding) => *encoding,
        };
        encoding.decode_without_bom_handling(bytes).0
    }
}

impl Default for Charset {
    fn default() -> Self {
        Charset::utf8()
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Charset::for_label(s)
    }
}

impl TryFrom<String> for Charset {
    type Error = Error;

    fn try_from(label: String) -> Result<Self> {
        Charset::for_label(&label)
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utf8() {
        let charset = Charset::default();
        assert_eq!(charset.name(), "UTF-8");
        assert_eq!(charset.encode("héllo").unwrap().len(), 6);
    }

    #[test]
    fn test_for_label_aliases() {
        assert_eq!(Charset::for_label("UTF8").unwrap(), Charset::utf8());
        assert_eq!(Charset::for_label("latin1").unwrap().name(), "windows-1252");
        assert_eq!(Charset::for_label("utf-16le").unwrap(), Charset::Utf16Le);
        assert_eq!(Charset::for_label("utf-16be").unwrap(), Charset::Utf16Be);
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!(
            Charset::for_label("klingon"),
            Err(Error::UnknownCharset(_))
        ));
        assert!(Charset::for_label("replacement").is_err());
    }

    #[test]
    fn test_single_byte_encoding() {
        let charset = Charset::for_label("windows-1252").unwrap();
        let bytes = charset.encode("café").unwrap();
        assert_eq!(bytes.as_ref(), &[b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_unmappable_character_fails() {
        let charset = Charset::for_label("windows-1252").unwrap();
        let result = charset.encode("snow \u{2603}");
        assert!(matches!(result, Err(Error::Encoding { .. })));
    }

    #[test]
    fn test_utf16_byte_orders() {
        assert_eq!(Charset::Utf16Le.encode("A").unwrap().as_ref(), &[0x41, 0x00]);
        assert_eq!(Charset::Utf16Be.encode("A").unwrap().as_ref(), &[0x00, 0x41]);
    }

    #[test]
    fn test_decode_matches_encode() {
        for charset in [Charset::utf8(), Charset::Utf16Le, Charset::Utf16Be] {
            let bytes = charset.encode("line \u{00e9}\n").unwrap();
            assert_eq!(charset.decode(&bytes), "line \u{00e9}\n");
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let charset: Charset = serde_json::from_str("\"shift_jis\"").unwrap();
        assert_eq!(charset.name(), "Shift_JIS");
        assert_eq!(serde_json::to_string(&charset).unwrap(), "\"Shift_JIS\"");
    }
}
