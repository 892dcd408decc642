//! Candidate text encodings, in fallback priority order.
//!
//! The list is fixed: a UTF-8 variant with byte-order-mark handling, then
//! UTF-16 (BOM decides endianness) with explicit little- and big-endian
//! fallbacks, then Windows-1252 and ISO-8859-15 as single-byte last
//! resorts. Note that `encoding_rs` resolves the `latin-1` label to
//! Windows-1252 per the WHATWG standard, so the ISO-standard fallback here
//! is ISO-8859-15.

use encoding_rs::{Encoding, ISO_8859_15, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// A candidate text encoding for reading an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, stripping a leading BOM when present.
    Utf8,
    /// UTF-16 with the BOM deciding endianness; little-endian when absent.
    Utf16,
    /// UTF-16 little-endian.
    Utf16Le,
    /// UTF-16 big-endian.
    Utf16Be,
    /// Windows-1252.
    Windows1252,
    /// ISO-8859-15.
    Iso8859_15,
}

/// Fallback order. Earlier candidates win; the error reported for an
/// unreadable file is the one from the last entry.
pub const CANDIDATES: [TextEncoding; 6] = [
    TextEncoding::Utf8,
    TextEncoding::Utf16,
    TextEncoding::Utf16Le,
    TextEncoding::Utf16Be,
    TextEncoding::Windows1252,
    TextEncoding::Iso8859_15,
];

impl TextEncoding {
    /// Label used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Iso8859_15 => "iso-8859-15",
        }
    }

    /// Decode raw bytes under this candidate.
    ///
    /// Returns `None` when the payload is malformed for this encoding.
    /// The two single-byte candidates accept any byte sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => decode_with_bom_removal(UTF_8, bytes),
            TextEncoding::Utf16 => {
                if bytes.starts_with(&[0xFF, 0xFE]) {
                    decode_raw(UTF_16LE, &bytes[2..])
                } else if bytes.starts_with(&[0xFE, 0xFF]) {
                    decode_raw(UTF_16BE, &bytes[2..])
                } else {
                    decode_raw(UTF_16LE, bytes)
                }
            }
            TextEncoding::Utf16Le => decode_with_bom_removal(UTF_16LE, bytes),
            TextEncoding::Utf16Be => decode_with_bom_removal(UTF_16BE, bytes),
            TextEncoding::Windows1252 => decode_raw(WINDOWS_1252, bytes),
            TextEncoding::Iso8859_15 => decode_raw(ISO_8859_15, bytes),
        }
    }
}

fn decode_with_bom_removal(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

fn decode_raw(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}
