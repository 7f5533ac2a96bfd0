//! Text helpers built on [`LineIndex`]: slicing, edits, line and word lookups.
//!
//! All offsets are byte offsets. Offsets derived from positions are clamped to the text and
//! moved back to the previous char boundary, so none of these helpers panic on positions that
//! point past a line or into a multi-byte character.

use std::sync::LazyLock;

use regex::Regex;

use crate::line_index::LineIndex;
use crate::normalize::{split_lines_with_delimiters, strip_final_newline};
use crate::range::{Position, Range};

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid word regex"));

/// Replace the text in `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The range to replace.
    pub range: Range,
    /// Replacement text (may contain newlines).
    pub new_text: String,
}

impl TextEdit {
    /// Create an edit; the range is normalized so that `start <= end`.
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range: range.normalized(),
            new_text: new_text.into(),
        }
    }
}

fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// The range covering all of `text`.
pub fn full_document_range(text: &str, index: &LineIndex) -> Range {
    let last = index.last_line();
    let last_start = index.line_starts()[last];
    Range::new(
        Position::new(0, 0),
        Position::new(last, text.len().saturating_sub(last_start)),
    )
}

/// A single edit replacing all of `text` with `new_text`.
pub fn full_replace_edit(text: &str, new_text: impl Into<String>) -> TextEdit {
    TextEdit::new(full_document_range(text, &LineIndex::new(text)), new_text)
}

/// Resolve `range` to an ordered `(start, end)` pair of byte offsets inside `text`.
pub fn range_to_offsets(text: &str, range: Range, index: &LineIndex) -> (usize, usize) {
    let a = clamp_offset(text, index.offset_at(range.start));
    let b = clamp_offset(text, index.offset_at(range.end));
    (a.min(b), a.max(b))
}

/// The range between two byte offsets.
pub fn offsets_to_range(start: usize, end: usize, index: &LineIndex) -> Range {
    Range::new(index.position_at(start), index.position_at(end))
}

/// The text covered by `range`.
pub fn slice_by_range<'a>(text: &'a str, range: Range, index: &LineIndex) -> &'a str {
    let (start, end) = range_to_offsets(text, range, index);
    &text[start..end]
}

/// A copy of `text` with `range` replaced by `replacement`.
pub fn replace_range(text: &str, range: Range, replacement: &str, index: &LineIndex) -> String {
    let (start, end) = range_to_offsets(text, range, index);
    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}

/// Apply a set of edits, all expressed against the original `text`.
///
/// Edits are sorted by range; the sort is stable, so inserts at the same position keep their
/// input order. Edits that only touch are applied one after the other. Overlapping edits are
/// compacted into one: the span grows to cover both and the later edit's text wins. The result
/// is applied back to front so earlier offsets stay valid.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    if edits.is_empty() {
        return text.to_string();
    }
    let index = LineIndex::new(text);

    let mut sorted: Vec<TextEdit> = edits
        .iter()
        .map(|edit| TextEdit::new(edit.range, edit.new_text.as_str()))
        .collect();
    sorted.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| a.range.end.cmp(&b.range.end))
    });

    let mut compact: Vec<TextEdit> = Vec::with_capacity(sorted.len());
    for edit in sorted {
        match compact.last_mut() {
            Some(last) if edit.range.start < last.range.end => {
                if edit.range.end > last.range.end {
                    last.range.end = edit.range.end;
                }
                last.new_text = edit.new_text;
            }
            _ => compact.push(edit),
        }
    }

    let mut out = text.to_string();
    for edit in compact.iter().rev() {
        let (start, end) = range_to_offsets(text, edit.range, &index);
        out.replace_range(start..end, &edit.new_text);
    }
    out
}

/// The text of `line`, without its terminator. Lines past the end clamp to the last line.
pub fn line_text_at<'a>(text: &'a str, line: usize, index: &LineIndex) -> &'a str {
    let line = line.min(index.last_line());
    let span = index.line_span(line).unwrap_or(0..0);
    let start = clamp_offset(text, span.start);
    let end = clamp_offset(text, span.end);
    strip_final_newline(&text[start..end])
}

/// Byte length of `line`, without its terminator.
pub fn line_length_at(text: &str, line: usize, index: &LineIndex) -> usize {
    line_text_at(text, line, index).len()
}

/// A word found by [`word_at_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordAt<'a> {
    /// The word text.
    pub word: &'a str,
    /// The word's range in the document.
    pub range: Range,
}

/// The `[A-Za-z0-9_]+` word touching `position`, if any.
///
/// A word touches the position when it starts at or before it and ends at or after it, so a
/// caret right after a word still finds it.
pub fn word_at_position<'a>(
    text: &'a str,
    position: Position,
    index: &LineIndex,
) -> Option<WordAt<'a>> {
    word_at_position_with(text, position, index, &WORD_REGEX)
}

/// [`word_at_position`] with a caller-supplied word pattern.
pub fn word_at_position_with<'a>(
    text: &'a str,
    position: Position,
    index: &LineIndex,
    word: &Regex,
) -> Option<WordAt<'a>> {
    let line = position.line.min(index.last_line());
    let line_text = line_text_at(text, line, index);
    let column = position.character.min(line_text.len());

    word.find_iter(line_text)
        .find(|m| m.start() <= column && m.end() >= column)
        .map(|m| WordAt {
            word: m.as_str(),
            range: Range::from_coords(line, m.start(), line, m.end()),
        })
}

/// Edits turning `old` into `new`: nothing when equal, otherwise one full replacement.
pub fn compute_minimal_edits(old: &str, new: &str) -> Vec<TextEdit> {
    if old == new {
        return Vec::new();
    }
    vec![full_replace_edit(old, new)]
}

/// A single edit spanning only the lines that differ between `old` and `new`.
///
/// Returns `None` when the texts have different line counts, and an empty list when they are
/// equal. Line breaks inside the edited span are copied from `new`, so applying the edit to
/// `old` always yields `new`.
pub fn compute_smart_line_edit(old: &str, new: &str) -> Option<Vec<TextEdit>> {
    if old == new {
        return Some(Vec::new());
    }
    let old_parts = split_lines_with_delimiters(old);
    let new_parts = split_lines_with_delimiters(new);
    if old_parts.len() != new_parts.len() {
        return None;
    }

    let differs = |i: usize| old_parts[i] != new_parts[i];
    let first = (0..old_parts.len()).find(|&i| differs(i))?;
    let last = (first..old_parts.len())
        .rev()
        .find(|&i| differs(i))
        .unwrap_or(first);

    let (old_first, new_first) = (old_parts[first].line, new_parts[first].line);
    let start_char = common_prefix_len(old_first, new_first);

    let mut replacement = String::new();
    for part in &new_parts[first..last] {
        replacement.push_str(part.line);
        replacement.push_str(part.delimiter.as_str());
    }
    let (old_last, new_last) = (&old_parts[last], &new_parts[last]);
    replacement.push_str(new_last.line);

    let range = if old_last.delimiter == new_last.delimiter {
        let suffix = if first == last {
            common_suffix_len(&old_first[start_char..], &new_first[start_char..])
        } else {
            common_suffix_len(old_last.line, new_last.line)
        };
        replacement.truncate(replacement.len() - suffix);
        Range::from_coords(first, start_char, last, old_last.line.len() - suffix)
    } else {
        // The terminator itself changed: replace through the start of the next line.
        replacement.push_str(new_last.delimiter.as_str());
        Range::from_coords(first, start_char, last + 1, 0)
    };
    replacement.replace_range(..start_char, "");
    Some(vec![TextEdit::new(range, replacement)])
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
