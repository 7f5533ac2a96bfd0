//! Line/character positions and ranges.
//!
//! Positions are zero-based; `character` is a byte offset within the line. Ordering is
//! lexicographic on `(line, character)`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A zero-based `(line, character)` position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based byte offset within the line.
    pub character: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Clamp `line` into `0..=max_line`; `character` is left as-is.
    pub fn clamp_line(self, max_line: usize) -> Self {
        Self {
            line: self.line.min(max_line),
            character: self.character,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.character.cmp(&other.character))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two positions as `-1`, `0` or `1`.
pub fn compare_position(a: Position, b: Position) -> i8 {
    match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Clamp a position's line into `0..=max_line`.
pub fn clamp_position(position: Position, max_line: usize) -> Position {
    position.clamp_line(max_line)
}

/// A range between two positions. The end is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Range start position (inclusive).
    pub start: Position,
    /// Range end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range from `(start_line, start_char)` to `(end_line, end_char)`.
    pub fn from_coords(start_line: usize, start_char: usize, end_line: usize, end_char: usize) -> Self {
        Self::new(
            Position::new(start_line, start_char),
            Position::new(end_line, end_char),
        )
    }

    /// A zero-width range at `position`.
    pub fn cursor(position: Position) -> Self {
        Self::new(position, position)
    }

    /// The same range with `start <= end`.
    pub fn normalized(self) -> Self {
        if self.start > self.end {
            Self::new(self.end, self.start)
        } else {
            self
        }
    }

    /// `true` if start and end are the same position.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` if `position` lies in `start..end`.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Grow the range on its own lines: `start` moves left by `start_delta`, `end` moves right
    /// by `end_delta`. The start never goes below character 0.
    pub fn expand_on_line(self, start_delta: usize, end_delta: usize) -> Self {
        Self::new(
            Position::new(
                self.start.line,
                self.start.character.saturating_sub(start_delta),
            ),
            Position::new(self.end.line, self.end.character + end_delta),
        )
    }
}

/// Normalize a range so that `start <= end`.
pub fn normalize_range(range: Range) -> Range {
    range.normalized()
}

/// Merge overlapping or touching ranges.
///
/// Every range is normalized, then all are sorted by start and swept left to right. A range
/// whose start is at or before the current end extends it. The output is sorted and
/// non-overlapping; merging again changes nothing, and the input order does not matter.
pub fn merge_ranges<I>(ranges: I) -> Vec<Range>
where
    I: IntoIterator<Item = Range>,
{
    let mut sorted: Vec<Range> = ranges.into_iter().map(Range::normalized).collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));

    let mut out: Vec<Range> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match out.last_mut() {
            Some(current) if range.start <= current.end => {
                if range.end > current.end {
                    current.end = range.end;
                }
            }
            _ => out.push(range),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position_ordering() {
        assert_eq!(compare_position(Position::new(0, 5), Position::new(1, 0)), -1);
        assert_eq!(compare_position(Position::new(2, 1), Position::new(2, 1)), 0);
        assert_eq!(compare_position(Position::new(2, 3), Position::new(2, 1)), 1);
    }

    #[test]
    fn test_clamp_position() {
        assert_eq!(clamp_position(Position::new(9, 4), 3), Position::new(3, 4));
        assert_eq!(clamp_position(Position::new(1, 4), 3), Position::new(1, 4));
    }

    #[test]
    fn test_normalize_swaps_reversed_range() {
        let reversed = Range::from_coords(3, 1, 1, 7);
        assert_eq!(normalize_range(reversed), Range::from_coords(1, 7, 3, 1));
        let ok = Range::from_coords(0, 0, 0, 1);
        assert_eq!(normalize_range(ok), ok);
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_ranges([
            Range::from_coords(0, 0, 0, 5),
            Range::from_coords(0, 3, 0, 8),
            Range::from_coords(1, 0, 1, 2),
        ]);
        assert_eq!(
            merged,
            vec![Range::from_coords(0, 0, 0, 8), Range::from_coords(1, 0, 1, 2)]
        );
    }

    #[test]
    fn test_merge_touching_and_contained() {
        let merged = merge_ranges([
            Range::from_coords(2, 0, 2, 4),
            Range::from_coords(0, 0, 0, 3),
            Range::from_coords(0, 3, 0, 6),
            Range::from_coords(0, 1, 0, 2),
        ]);
        assert_eq!(
            merged,
            vec![Range::from_coords(0, 0, 0, 6), Range::from_coords(2, 0, 2, 4)]
        );
    }

    #[test]
    fn test_merge_normalizes_reversed_input() {
        let merged = merge_ranges([Range::from_coords(1, 4, 1, 0), Range::from_coords(1, 2, 1, 9)]);
        assert_eq!(merged, vec![Range::from_coords(1, 0, 1, 9)]);
        assert!(merge_ranges(Vec::new()).is_empty());
    }

    #[test]
    fn test_contains_and_cursor() {
        let range = Range::from_coords(1, 2, 1, 5);
        assert!(range.contains(Position::new(1, 2)));
        assert!(!range.contains(Position::new(1, 5)));
        assert!(Range::cursor(Position::new(4, 4)).is_empty());
        assert_eq!(range.expand_on_line(3, 1), Range::from_coords(1, 0, 1, 6));
    }
}
