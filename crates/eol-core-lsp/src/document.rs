//! Per-version document snapshots.
//!
//! A [`DocumentSnapshot`] owns one version of a document's text together with everything
//! derived from it: line-ending statistics, line indexes over the original and the LF view,
//! and the CRLF marks bridging the two. A new version always builds a new snapshot.

use eol_core::{
    CrlfMarks, EolKind, EolStats, LineEnding, LineIndex, Position, Range, full_document_range,
    line_text_at, normalize_eol, word_at_position,
};
use tracing::debug;

use crate::error::LspError;
use crate::lsp_position::{LspCoordinateConverter, LspPosition, LspRange, PositionEncoding};

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// One immutable version of a text document.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    version: i32,
    text: String,
    stats: EolStats,
    line_ending: LineEnding,
    index: LineIndex,
    lf_text: String,
    lf_index: LineIndex,
    marks: CrlfMarks,
    encoding: PositionEncoding,
}

impl DocumentSnapshot {
    /// Build a snapshot of `text` at `version`, using UTF-16 positions.
    pub fn new(version: i32, text: impl Into<String>) -> Self {
        let text = text.into();
        let stats = EolStats::measure(&text);
        let index = LineIndex::new(&text);
        let marks = CrlfMarks::from_text(&text);
        let lf_text = normalize_eol(&text, EolKind::Lf).into_owned();
        // Bare CRs keep their length when normalized, so without pairs the line starts match.
        let lf_index = if marks.is_empty() {
            index.clone()
        } else {
            LineIndex::new(&lf_text)
        };

        debug!(
            version,
            len = text.len(),
            lines = index.line_count(),
            crlf = stats.crlf,
            mixed = stats.is_mixed(),
            "built document snapshot"
        );

        Self {
            version,
            line_ending: LineEnding::from_stats(&stats),
            text,
            stats,
            index,
            lf_text,
            lf_index,
            marks,
            encoding: PositionEncoding::default(),
        }
    }

    /// Use `encoding` for all LSP positions produced or consumed by this snapshot.
    pub fn with_encoding(mut self, encoding: PositionEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Build the next version from a full-text change.
    ///
    /// Versions must increase; an update that is not newer than this snapshot is rejected.
    pub fn update(&self, version: i32, text: impl Into<String>) -> Result<Self, LspError> {
        if version <= self.version {
            return Err(LspError::StaleVersion {
                current: self.version,
                received: version,
            });
        }
        Ok(Self::new(version, text).with_encoding(self.encoding))
    }

    /// The document version.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The LF-normalized text.
    pub fn lf_text(&self) -> &str {
        &self.lf_text
    }

    /// Line-ending statistics of the original text.
    pub fn stats(&self) -> &EolStats {
        &self.stats
    }

    /// Dominant line ending of the original text.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Line index over the original text.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// Line index over the LF-normalized text.
    pub fn lf_line_index(&self) -> &LineIndex {
        &self.lf_index
    }

    /// CRLF marks of the original text.
    pub fn marks(&self) -> &CrlfMarks {
        &self.marks
    }

    /// Position encoding used on the wire.
    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Content of `line` without its terminator; lines past the end clamp to the last line.
    pub fn line_text(&self, line: usize) -> &str {
        line_text_at(&self.text, line, &self.index)
    }

    /// Convert a byte position in the original text to an LSP position.
    ///
    /// The line clamps to the document and the character to the line's content, so positions
    /// inside a terminator or past the end of a line land at the end of the line.
    pub fn to_lsp_position(&self, position: Position) -> LspPosition {
        let line = position.line.min(self.index.last_line());
        let units = LspCoordinateConverter::byte_to_encoded(
            self.line_text(line),
            position.character,
            self.encoding,
        );
        LspPosition::new(to_u32(line), to_u32(units))
    }

    /// Convert an LSP position to a byte position in the original text.
    ///
    /// Lines past the end clamp to the last line and characters to the line's content.
    pub fn from_lsp_position(&self, position: LspPosition) -> Position {
        let line = (position.line as usize).min(self.index.last_line());
        let byte = LspCoordinateConverter::encoded_to_byte(
            self.line_text(line),
            position.character as usize,
            self.encoding,
        );
        Position::new(line, byte)
    }

    /// Like [`DocumentSnapshot::from_lsp_position`], but rejects lines that do not exist.
    pub fn try_from_lsp_position(&self, position: LspPosition) -> Result<Position, LspError> {
        let line = position.line as usize;
        if line >= self.line_count() {
            return Err(eol_core::CoordinateError::LineOutOfBounds {
                line,
                line_count: self.line_count(),
            }
            .into());
        }
        Ok(self.from_lsp_position(position))
    }

    /// Byte offset in the original text for an LSP position.
    pub fn offset_at(&self, position: LspPosition) -> usize {
        self.index.offset_at(self.from_lsp_position(position))
    }

    /// LSP position of a byte offset in the original text.
    pub fn lsp_position_at(&self, offset: usize) -> LspPosition {
        self.to_lsp_position(self.index.position_at(offset.min(self.text.len())))
    }

    /// Convert a byte range in the original text to an LSP range.
    pub fn to_lsp_range(&self, range: Range) -> LspRange {
        let range = range.normalized();
        LspRange::new(
            self.to_lsp_position(range.start),
            self.to_lsp_position(range.end),
        )
    }

    /// Convert an LSP range to a normalized byte range in the original text.
    pub fn from_lsp_range(&self, range: LspRange) -> Range {
        Range::new(
            self.from_lsp_position(range.start),
            self.from_lsp_position(range.end),
        )
        .normalized()
    }

    /// Report a range computed against the LF view as an LSP range on the original document.
    pub fn lf_range_to_lsp(&self, range: Range) -> LspRange {
        let original = self
            .marks
            .remap_range_to_original(range, &self.lf_index, &self.index);
        self.to_lsp_range(original)
    }

    /// LSP position of a byte offset in the LF view.
    pub fn lf_offset_to_lsp(&self, lf_offset: usize) -> LspPosition {
        self.lsp_position_at(self.marks.remap_offset(lf_offset))
    }

    /// Byte offset in the LF view for an LSP position.
    pub fn lsp_to_lf_offset(&self, position: LspPosition) -> usize {
        self.marks.original_to_lf_offset(self.offset_at(position))
    }

    /// The range covering the whole document.
    pub fn full_range(&self) -> LspRange {
        self.to_lsp_range(full_document_range(&self.text, &self.index))
    }

    /// The word touching `position` and its range, for hover.
    pub fn word_at(&self, position: LspPosition) -> Option<(&str, LspRange)> {
        let position = self.from_lsp_position(position);
        word_at_position(&self.text, position, &self.index)
            .map(|found| (found.word, self.to_lsp_range(found.range)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tracks_eol() {
        let doc = DocumentSnapshot::new(1, "a\r\nb\r\nc\n");
        assert_eq!(doc.line_ending(), LineEnding::Crlf);
        assert!(doc.stats().is_mixed());
        assert_eq!(doc.lf_text(), "a\nb\nc\n");
        assert_eq!(doc.marks().len(), 2);
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.lf_line_index().line_starts(), &[0, 2, 4, 6]);
    }

    #[test]
    fn test_lsp_positions_in_utf16() {
        let doc = DocumentSnapshot::new(1, "let 🦀 = 1;\r\nx");
        // '=' sits after "let 🦀 " which is 8 bytes / 7 UTF-16 units.
        assert_eq!(doc.to_lsp_position(Position::new(0, 9)), LspPosition::new(0, 7));
        assert_eq!(doc.from_lsp_position(LspPosition::new(0, 7)), Position::new(0, 9));
        assert_eq!(doc.offset_at(LspPosition::new(1, 0)), 15);
    }

    #[test]
    fn test_position_inside_terminator_clamps_to_line_end() {
        let doc = DocumentSnapshot::new(1, "ab\r\ncd");
        // Byte 3 is the '\n' of the pair.
        assert_eq!(doc.lsp_position_at(3), LspPosition::new(0, 2));
        assert_eq!(doc.from_lsp_position(LspPosition::new(0, 40)), Position::new(0, 2));
        assert_eq!(doc.from_lsp_position(LspPosition::new(9, 1)), Position::new(1, 1));
    }

    #[test]
    fn test_try_from_lsp_position_rejects_missing_line() {
        let doc = DocumentSnapshot::new(1, "a\nb");
        assert!(doc.try_from_lsp_position(LspPosition::new(1, 0)).is_ok());
        assert!(matches!(
            doc.try_from_lsp_position(LspPosition::new(2, 0)),
            Err(LspError::Coordinate(_))
        ));
    }

    #[test]
    fn test_lf_range_maps_onto_original() {
        let doc = DocumentSnapshot::new(1, "one\r\ntwo three\r\n");
        let lf = doc.lf_text();
        let start = lf.find("three").unwrap();
        let range = Range::new(
            doc.lf_line_index().position_at(start),
            doc.lf_line_index().position_at(start + 5),
        );
        assert_eq!(
            doc.lf_range_to_lsp(range),
            LspRange::new(LspPosition::new(1, 4), LspPosition::new(1, 9))
        );
        assert_eq!(doc.lf_offset_to_lsp(start), LspPosition::new(1, 4));
        assert_eq!(doc.lsp_to_lf_offset(LspPosition::new(1, 4)), start);
    }

    #[test]
    fn test_update_rejects_stale_versions() {
        let doc = DocumentSnapshot::new(3, "a").with_encoding(PositionEncoding::Utf8);
        let next = doc.update(4, "b").unwrap();
        assert_eq!(next.version(), 4);
        assert_eq!(next.encoding(), PositionEncoding::Utf8);
        assert!(matches!(
            doc.update(3, "c"),
            Err(LspError::StaleVersion {
                current: 3,
                received: 3
            })
        ));
    }

    #[test]
    fn test_word_at() {
        let doc = DocumentSnapshot::new(1, "fn é_x foo_bar() {}");
        let (word, range) = doc.word_at(LspPosition::new(0, 9)).unwrap();
        assert_eq!(word, "foo_bar");
        assert_eq!(
            range,
            LspRange::new(LspPosition::new(0, 7), LspPosition::new(0, 14))
        );
        assert!(doc.word_at(LspPosition::new(0, 17)).is_none());
    }
}
