//! Logical Line Index
//!
//! A sorted table of line-start offsets built in one scan, giving O(log N) conversion between
//! byte offsets and `(line, character)` positions.
//!
//! `'\n'`, `"\r\n"` and lone `'\r'` all end a line; a CRLF pair is a single terminator that ends
//! at its `'\n'`.

use tracing::trace;

use crate::error::CoordinateError;
use crate::range::Position;

/// Line-start table for one text snapshot.
///
/// `starts[0] == 0` and the table is strictly increasing. A text ending with a terminator has a
/// final, empty line starting at `text.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the line index of `text`.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut starts = Vec::with_capacity(bytes.len() / 32 + 1);
        starts.push(0);

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    starts.push(i + 1);
                }
                b'\n' => starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }

        Self {
            starts,
            len: bytes.len(),
        }
    }

    /// Line-start offsets, one per logical line.
    pub fn line_starts(&self) -> &[usize] {
        &self.starts
    }

    /// Number of logical lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Index of the last line.
    pub fn last_line(&self) -> usize {
        self.starts.len() - 1
    }

    /// Byte length of the indexed text.
    pub fn text_len(&self) -> usize {
        self.len
    }

    /// Start offset of `line`, or `None` past the last line.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Offset range of `line` including its terminator.
    pub fn line_span(&self, line: usize) -> Option<std::ops::Range<usize>> {
        let start = self.line_start(line)?;
        let end = self.line_start(line + 1).unwrap_or(self.len);
        Some(start..end)
    }

    /// Convert a byte offset to a position.
    ///
    /// Finds the last line starting at or before `offset`. Offsets past the end of the text are
    /// not clamped; they land on the last line with a correspondingly large character.
    pub fn position_at(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        Position::new(line, offset - self.starts[line])
    }

    /// Convert a position to a byte offset.
    ///
    /// The line is clamped into the table. The character is added without checking it against
    /// the line's length, so a position may point past the end of its line.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line.min(self.last_line());
        self.starts[line] + position.character
    }

    /// Like [`LineIndex::position_at`], but rejects offsets past the end of the text.
    pub fn try_position_at(&self, offset: usize) -> Result<Position, CoordinateError> {
        if offset > self.len {
            trace!(offset, len = self.len, "rejecting out-of-bounds offset");
            return Err(CoordinateError::OffsetOutOfBounds {
                offset,
                len: self.len,
            });
        }
        Ok(self.position_at(offset))
    }

    /// Like [`LineIndex::offset_at`], but rejects lines that do not exist and positions that
    /// resolve past the end of the text.
    pub fn try_offset_at(&self, position: Position) -> Result<usize, CoordinateError> {
        let Some(start) = self.line_start(position.line) else {
            return Err(CoordinateError::LineOutOfBounds {
                line: position.line,
                line_count: self.line_count(),
            });
        };
        let offset = start + position.character;
        if offset > self.len {
            return Err(CoordinateError::OffsetOutOfBounds {
                offset,
                len: self.len,
            });
        }
        Ok(offset)
    }

    /// Cheap guard that `text` is plausibly the snapshot this index was built from.
    pub fn check_snapshot(&self, text: &str) -> Result<(), CoordinateError> {
        if text.len() == self.len {
            Ok(())
        } else {
            Err(CoordinateError::SnapshotMismatch {
                expected: self.len,
                actual: text.len(),
            })
        }
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_starts(), &[0]);
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position_at(0), Position::new(0, 0));
    }

    #[test]
    fn test_line_starts_for_each_terminator() {
        assert_eq!(LineIndex::new("ab\ncd").line_starts(), &[0, 3]);
        assert_eq!(LineIndex::new("ab\r\ncd").line_starts(), &[0, 4]);
        assert_eq!(LineIndex::new("ab\rcd").line_starts(), &[0, 3]);
        assert_eq!(LineIndex::new("a\n").line_starts(), &[0, 2]);
        assert_eq!(LineIndex::new("\r\r\n\n").line_starts(), &[0, 1, 3, 4]);
    }

    #[test]
    fn test_position_at() {
        let index = LineIndex::new("ABC\nDEF\r\nGHI");
        assert_eq!(index.position_at(0), Position::new(0, 0));
        assert_eq!(index.position_at(2), Position::new(0, 2));
        assert_eq!(index.position_at(3), Position::new(0, 3));
        assert_eq!(index.position_at(4), Position::new(1, 0));
        assert_eq!(index.position_at(8), Position::new(1, 4));
        assert_eq!(index.position_at(9), Position::new(2, 0));
        assert_eq!(index.position_at(12), Position::new(2, 3));
        // Past the end stays on the last line.
        assert_eq!(index.position_at(20), Position::new(2, 11));
    }

    #[test]
    fn test_offset_at() {
        let index = LineIndex::new("ABC\nDEF\nGHI");
        assert_eq!(index.offset_at(Position::new(0, 0)), 0);
        assert_eq!(index.offset_at(Position::new(1, 2)), 6);
        assert_eq!(index.offset_at(Position::new(2, 0)), 8);
        // Line is clamped, character is not.
        assert_eq!(index.offset_at(Position::new(7, 1)), 9);
        assert_eq!(index.offset_at(Position::new(0, 10)), 10);
    }

    #[test]
    fn test_utf8_offsets() {
        let text = "你好\n世界";
        let index = LineIndex::new(text);
        assert_eq!(index.line_starts(), &[0, 7]);
        assert_eq!(index.position_at(10), Position::new(1, 3));
        assert!(text.is_char_boundary(index.offset_at(Position::new(1, 3))));
    }

    #[test]
    fn test_checked_conversions() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.try_position_at(5), Ok(Position::new(1, 2)));
        assert_eq!(
            index.try_position_at(6),
            Err(CoordinateError::OffsetOutOfBounds { offset: 6, len: 5 })
        );
        assert_eq!(
            index.try_offset_at(Position::new(2, 0)),
            Err(CoordinateError::LineOutOfBounds {
                line: 2,
                line_count: 2
            })
        );
        assert_eq!(
            index.try_offset_at(Position::new(1, 3)),
            Err(CoordinateError::OffsetOutOfBounds { offset: 6, len: 5 })
        );
        assert!(index.check_snapshot("ab\ncd").is_ok());
        assert!(index.check_snapshot("ab\r\ncd").is_err());
    }

    #[test]
    fn test_line_span() {
        let index = LineIndex::new("ab\r\ncd");
        assert_eq!(index.line_span(0), Some(0..4));
        assert_eq!(index.line_span(1), Some(4..6));
        assert_eq!(index.line_span(2), None);
    }

    #[test]
    fn test_large_document() {
        let mut lines = Vec::new();
        for i in 0..10000 {
            lines.push(format!("Line {}", i));
        }
        let text = lines.join("\r\n");
        let index = LineIndex::new(&text);
        assert_eq!(index.line_count(), 10000);

        for line in [0, 100, 1000, 5000, 9999] {
            let offset = index.offset_at(Position::new(line, 0));
            assert_eq!(index.position_at(offset), Position::new(line, 0));
        }
    }
}
