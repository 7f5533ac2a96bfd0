#![warn(missing_docs)]
//! EOL Core - line-ending normalization and text-coordinate mapping
//!
//! # Overview
//!
//! `eol-core` is the text-coordinate foundation for editor tooling. Editor protocols describe
//! positions in one line-ending convention while a document (or a streamed buffer) may use
//! another: LF, CRLF, bare CR, or a mix. Every diagnostic range, hover span and formatting edit
//! depends on converting between these views correctly.
//!
//! # Core Features
//!
//! - **Statistics**: single-pass counts of LF, CRLF and bare CR terminators
//! - **Detection**: dominant line ending by majority vote, with an optional bias
//! - **Normalization**: LF/CRLF conversion plus final-newline policy
//! - **Line Index**: sorted line-start table, O(log n) offset/position conversion
//! - **CRLF Remapping**: O(log n) correction from LF-canonical offsets back to the original text
//! - **Streaming**: chunked normalization that handles a CRLF pair split between chunks
//! - **Ranges**: normalize, compare, clamp and merge `(line, character)` ranges
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Text helpers (edits, slices, words)        │  ← Consumers
//! ├─────────────────────────────────────────────┤
//! │  CRLF Remapper        │  Range Utilities    │  ← Coordinate bridging
//! ├─────────────────────────────────────────────┤
//! │  Line Index (sorted line starts)            │  ← Offset ↔ Position
//! ├─────────────────────────────────────────────┤
//! │  Normalizer & Policy  │  Streaming          │  ← Text transforms
//! ├─────────────────────────────────────────────┤
//! │  Statistics & Detection                     │  ← Classification
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use eol_core::{CrlfMarks, EolKind, LineEnding, LineIndex, Position, normalize_eol};
//!
//! let original = "fn main() {\r\n    run();\r\n}\r\n";
//! assert_eq!(LineEnding::detect(original), LineEnding::Crlf);
//!
//! // Work in LF space...
//! let lf = normalize_eol(original, EolKind::Lf);
//! let lf_index = LineIndex::new(&lf);
//! let call = lf_index.offset_at(Position::new(1, 4));
//!
//! // ...and report against the original buffer.
//! let marks = CrlfMarks::from_text(original);
//! let original_index = LineIndex::new(original);
//! let offset = marks.remap_offset(call);
//! assert_eq!(&original[offset..offset + 3], "run");
//! assert_eq!(original_index.position_at(offset), Position::new(1, 4));
//! ```
//!
//! # Units
//!
//! Offsets and `Position::character` are UTF-8 byte offsets. `'\r'` and `'\n'` are ASCII, so
//! scanning bytes is exact and every offset the engine produces is a char boundary. Protocol
//! units (UTF-16) are handled by `eol-core-lsp`.
//!
//! # Snapshots
//!
//! [`LineIndex`] and [`CrlfMarks`] are values derived from one text snapshot. Rebuild them
//! whenever the text changes; `check_snapshot` offers a cheap length-based guard.

pub mod error;
pub mod line_ending;
pub mod line_index;
pub mod normalize;
pub mod range;
pub mod remap;
pub mod stats;
pub mod stream;
pub mod text;

pub use error::CoordinateError;
pub use line_ending::{EolKind, LineEnding};
pub use line_index::LineIndex;
pub use normalize::{
    DelimitedLine, Delimiter, EolMode, EolPolicy, apply_eol_policy, ensure_final_newline,
    join_lines, join_lines_preserve_last_terminator, normalize_eol, split_lines,
    split_lines_with_delimiters, strip_final_newline,
};
pub use range::{
    Position, Range, clamp_position, compare_position, merge_ranges, normalize_range,
};
pub use remap::CrlfMarks;
pub use stats::{EolStats, count_lines, has_mixed_eol, is_terminated, measure_eol};
pub use stream::{
    ChunkNormalizer, ChunkState, expand_lf_chunk, normalize_bytes_to_lf, normalize_chunk_to_lf,
};
pub use text::{
    TextEdit, WordAt, apply_edits, compute_minimal_edits, compute_smart_line_edit,
    full_document_range, full_replace_edit, line_length_at, line_text_at, offsets_to_range,
    range_to_offsets, replace_range, slice_by_range, word_at_position, word_at_position_with,
};
