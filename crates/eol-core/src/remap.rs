//! CRLF remapping between canonical (LF) and original coordinates.
//!
//! Consumers that work on the LF-normalized view of a document still have to report offsets
//! against the original buffer. Instead of rescanning, [`CrlfMarks`] records where each `"\r\n"`
//! pair collapsed to a single `'\n'` and corrects offsets with a binary search.

use crate::error::CoordinateError;
use crate::line_index::LineIndex;
use crate::range::Range;

/// Canonical-space offsets of every `'\n'` that came from a collapsed `"\r\n"` pair.
///
/// Sorted and free of duplicates. Only valid for the exact text it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrlfMarks {
    marks: Vec<usize>,
    source_len: usize,
}

impl CrlfMarks {
    /// Scan `text` and record the LF-space offset of each CRLF pair's surviving `'\n'`.
    ///
    /// Lone `'\r'` characters also normalize to `'\n'` but keep their length, so they do not
    /// produce marks.
    pub fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut marks = Vec::new();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b'\r' && bytes[i + 1] == b'\n' {
                // Every earlier pair lost one byte.
                marks.push(i - marks.len());
                i += 2;
            } else {
                i += 1;
            }
        }
        Self {
            marks,
            source_len: bytes.len(),
        }
    }

    /// The recorded offsets, ascending.
    pub fn as_slice(&self) -> &[usize] {
        &self.marks
    }

    /// Number of collapsed CRLF pairs.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// `true` if the text contained no CRLF pair.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Byte length of the original text.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Map an LF-space offset back to the original text.
    ///
    /// Each mark strictly before `lf_offset` reinserts one `'\r'`. An offset sitting on a
    /// collapsed `'\n'` maps to the `'\r'` that started the pair, i.e. the end of that line's
    /// content.
    pub fn remap_offset(&self, lf_offset: usize) -> usize {
        lf_offset + self.marks.partition_point(|&mark| mark < lf_offset)
    }

    /// Map an offset in the original text into LF space.
    ///
    /// Both bytes of a CRLF pair map to the `'\n'` that survives normalization.
    pub fn original_to_lf_offset(&self, offset: usize) -> usize {
        // The pair recorded at index `k` starts at `marks[k] + k` in the original text; count
        // the pairs starting before `offset`.
        let mut lo = 0;
        let mut hi = self.marks.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.marks[mid] + mid < offset {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        offset - lo
    }

    /// Remap an LF-space range through the marks.
    ///
    /// Both ends go through `lf_index` to offsets, are remapped, and are converted back with
    /// the same `lf_index`. The resulting positions are therefore only meaningful for further
    /// LF-space arithmetic; use [`CrlfMarks::remap_range_to_original`] for positions in the
    /// original buffer.
    pub fn remap_range(&self, range: Range, lf_index: &LineIndex) -> Range {
        let start = self.remap_offset(lf_index.offset_at(range.start));
        let end = self.remap_offset(lf_index.offset_at(range.end));
        Range::new(lf_index.position_at(start), lf_index.position_at(end))
    }

    /// Remap an LF-space range to positions in the original text.
    ///
    /// `original_index` must be built over the original (CRLF-bearing) text.
    pub fn remap_range_to_original(
        &self,
        range: Range,
        lf_index: &LineIndex,
        original_index: &LineIndex,
    ) -> Range {
        let start = self.remap_offset(lf_index.offset_at(range.start));
        let end = self.remap_offset(lf_index.offset_at(range.end));
        Range::new(
            original_index.position_at(start),
            original_index.position_at(end),
        )
    }

    /// Cheap guard that `text` is plausibly the original text these marks were built from.
    pub fn check_snapshot(&self, text: &str) -> Result<(), CoordinateError> {
        if text.len() == self.source_len {
            Ok(())
        } else {
            Err(CoordinateError::SnapshotMismatch {
                expected: self.source_len,
                actual: text.len(),
            })
        }
    }
}
