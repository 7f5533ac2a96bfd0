#![warn(missing_docs)]
//! `eol-core-lsp` - LSP integration for `eol-core`.
//!
//! This crate holds the protocol-facing pieces: position encodings (UTF-16 by default),
//! per-version document snapshots that bridge the LF view and the original text, `TextEdit`
//! JSON helpers, formatting settings with a hot-reloadable store, and a whitespace/line-ending
//! formatting pass.

pub mod document;
pub mod error;
pub mod formatting;
pub mod lsp_position;
pub mod lsp_text_edits;
pub mod settings;

pub use document::DocumentSnapshot;
pub use error::LspError;
pub use formatting::{format_document, format_text, mixed_indentation_lines};
pub use lsp_position::{LspCoordinateConverter, LspPosition, LspRange, PositionEncoding};
pub use lsp_text_edits::{
    LspTextEdit, apply_text_edits, parse_text_edits, resolve_text_edits, text_edits_from_value,
};
pub use settings::{
    FormattingSettings, MAX_TAB_SIZE, MIN_TAB_SIZE, SettingsSnapshot, SettingsStore,
};
