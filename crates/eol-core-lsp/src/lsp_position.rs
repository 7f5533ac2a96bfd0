//! LSP positions and coordinate conversion.
//!
//! `eol-core` counts characters in UTF-8 bytes. LSP clients count them in the negotiated
//! position encoding, UTF-16 code units unless the client offers something else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unit used for `Position::character` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionEncoding {
    /// UTF-8 code units (bytes).
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16 code units. The LSP default.
    #[default]
    #[serde(rename = "utf-16")]
    Utf16,
    /// Unicode scalar values.
    #[serde(rename = "utf-32")]
    Utf32,
}

impl PositionEncoding {
    /// Parse a `PositionEncodingKind` name.
    pub fn from_lsp_name(name: &str) -> Option<Self> {
        match name {
            "utf-8" => Some(Self::Utf8),
            "utf-16" => Some(Self::Utf16),
            "utf-32" => Some(Self::Utf32),
            _ => None,
        }
    }

    /// The `PositionEncodingKind` name.
    pub fn as_lsp_name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Utf32 => "utf-32",
        }
    }

    /// Pick an encoding from the client's `general.positionEncodings` list.
    ///
    /// UTF-8 is preferred since it needs no conversion; anything else falls back to UTF-16,
    /// which every client must support.
    pub fn negotiate<'a>(offered: impl IntoIterator<Item = &'a str>) -> Self {
        if offered
            .into_iter()
            .filter_map(Self::from_lsp_name)
            .any(|encoding| encoding == Self::Utf8)
        {
            Self::Utf8
        } else {
            Self::Utf16
        }
    }

    /// Width of `ch` in this encoding.
    pub fn char_len(self, ch: char) -> usize {
        match self {
            Self::Utf8 => ch.len_utf8(),
            Self::Utf16 => ch.len_utf16(),
            Self::Utf32 => 1,
        }
    }
}

/// LSP Position, `character` counted in the negotiated encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LspPosition {
    /// Line number (0-based)
    pub line: u32,
    /// Character offset (0-based)
    pub character: u32,
}

impl LspPosition {
    /// Create a new LSP position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Parse a `Position`-shaped JSON value.
    ///
    /// Negative numbers clamp to 0 and values beyond `u32::MAX` saturate.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            line: saturating_u32(value.get("line")?)?,
            character: saturating_u32(value.get("character")?)?,
        })
    }
}

fn saturating_u32(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).unwrap_or(u32::MAX));
    }
    if value.as_i64().is_some() {
        // Only negative integers reach this point.
        return Some(0);
    }
    None
}

/// LSP Range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LspRange {
    /// Range start position (inclusive).
    pub start: LspPosition,
    /// Range end position (exclusive).
    pub end: LspPosition,
}

impl LspRange {
    /// Create a new LSP range.
    pub fn new(start: LspPosition, end: LspPosition) -> Self {
        Self { start, end }
    }

    /// Parse a `Range`-shaped JSON value.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            start: LspPosition::from_value(value.get("start")?)?,
            end: LspPosition::from_value(value.get("end")?)?,
        })
    }
}

/// LSP coordinate converter
///
/// Converts between byte offsets within one line and encoded character offsets.
pub struct LspCoordinateConverter;

impl LspCoordinateConverter {
    /// Length of `text` in `encoding` units.
    pub fn encoded_len(text: &str, encoding: PositionEncoding) -> usize {
        match encoding {
            PositionEncoding::Utf8 => text.len(),
            PositionEncoding::Utf16 => text.encode_utf16().count(),
            PositionEncoding::Utf32 => text.chars().count(),
        }
    }

    /// Convert a byte offset within `line_text` to encoded units.
    ///
    /// Offsets past the line clamp to its end; offsets inside a character count only the
    /// characters before it.
    pub fn byte_to_encoded(line_text: &str, byte_offset: usize, encoding: PositionEncoding) -> usize {
        let mut byte_offset = byte_offset.min(line_text.len());
        while !line_text.is_char_boundary(byte_offset) {
            byte_offset -= 1;
        }
        Self::encoded_len(&line_text[..byte_offset], encoding)
    }

    /// Convert encoded units within `line_text` to a byte offset.
    ///
    /// A unit offset landing inside a character (half of a surrogate pair) moves past that
    /// character. Offsets past the line clamp to its end.
    pub fn encoded_to_byte(line_text: &str, units: usize, encoding: PositionEncoding) -> usize {
        if encoding == PositionEncoding::Utf8 {
            let mut offset = units.min(line_text.len());
            while !line_text.is_char_boundary(offset) {
                offset += 1;
            }
            return offset;
        }

        let mut current = 0;
        for (byte, ch) in line_text.char_indices() {
            if current >= units {
                return byte;
            }
            current += encoding.char_len(ch);
        }
        line_text.len()
    }

    /// UTF-16 length of `text`.
    pub fn utf8_to_utf16_len(text: &str) -> usize {
        Self::encoded_len(text, PositionEncoding::Utf16)
    }
}
