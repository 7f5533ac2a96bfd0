//! Minimal helpers for LSP `TextEdit` structures.
//!
//! Only the small subset needed to exchange formatting edits is parsed; there is no
//! `lsp-types` dependency.

use eol_core::{TextEdit, apply_edits};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::document::DocumentSnapshot;
use crate::error::LspError;
use crate::lsp_position::LspRange;

/// A minimal representation of an LSP `TextEdit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspTextEdit {
    /// The range to replace, in the document's position encoding.
    pub range: LspRange,
    /// Replacement text (may contain newlines).
    pub new_text: String,
}

impl LspTextEdit {
    /// Create an edit.
    pub fn new(range: LspRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// Parse a `TextEdit`-shaped JSON value.
    ///
    /// Negative line or character values clamp to 0. A missing `newText` is an empty string.
    pub fn from_value(value: &Value) -> Option<Self> {
        let range = LspRange::from_value(value.get("range")?)?;
        let new_text = value
            .get("newText")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        Some(Self { range, new_text })
    }
}

/// Parse a JSON array of `TextEdit` values, skipping malformed entries.
pub fn text_edits_from_value(value: &Value) -> Vec<LspTextEdit> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|item| {
                    let edit = LspTextEdit::from_value(item);
                    if edit.is_none() {
                        trace!(%item, "skipping malformed TextEdit");
                    }
                    edit
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

/// Parse a JSON document holding an array of `TextEdit`s, rejecting any malformed entry.
pub fn parse_text_edits(json: &str) -> Result<Vec<LspTextEdit>, LspError> {
    let value: Value = serde_json::from_str(json)?;
    let items = value.as_array().ok_or_else(|| LspError::Malformed {
        kind: "TextEdit[]",
        reason: "expected an array".to_string(),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            LspTextEdit::from_value(item).ok_or_else(|| LspError::Malformed {
                kind: "TextEdit",
                reason: format!("entry {i} lacks a valid range"),
            })
        })
        .collect()
}

/// Convert LSP edits to core edits against the snapshot's original text.
pub fn resolve_text_edits(snapshot: &DocumentSnapshot, edits: &[LspTextEdit]) -> Vec<TextEdit> {
    edits
        .iter()
        .map(|edit| TextEdit::new(snapshot.from_lsp_range(edit.range), edit.new_text.as_str()))
        .collect()
}

/// Apply LSP edits to the snapshot's text, returning the new text.
pub fn apply_text_edits(snapshot: &DocumentSnapshot, edits: &[LspTextEdit]) -> String {
    apply_edits(snapshot.text(), &resolve_text_edits(snapshot, edits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsp_position::LspPosition;
    use serde_json::json;

    #[test]
    fn test_from_value_clamps_negatives() {
        let value = json!({
            "range": {
                "start": { "line": -1, "character": -4 },
                "end": { "line": 0, "character": 2 }
            },
            "newText": "x"
        });
        let edit = LspTextEdit::from_value(&value).unwrap();
        assert_eq!(
            edit.range,
            LspRange::new(LspPosition::new(0, 0), LspPosition::new(0, 2))
        );
        assert_eq!(edit.new_text, "x");
    }

    #[test]
    fn test_serialized_edit_parses_back() {
        let edit = LspTextEdit::new(
            LspRange::new(LspPosition::new(1, 2), LspPosition::new(3, 4)),
            "hi",
        );
        let value = serde_json::to_value(&edit).unwrap();
        assert_eq!(value["newText"], json!("hi"));
        assert_eq!(value["range"]["end"], json!({ "line": 3, "character": 4 }));
        assert_eq!(LspTextEdit::from_value(&value), Some(edit));
    }

    #[test]
    fn test_text_edits_from_value_skips_malformed() {
        let value = json!([
            { "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 1 } }, "newText": "a" },
            { "newText": "no range" },
        ]);
        assert_eq!(text_edits_from_value(&value).len(), 1);
        assert!(text_edits_from_value(&json!({})).is_empty());
    }

    #[test]
    fn test_parse_text_edits_is_strict() {
        assert!(matches!(parse_text_edits("{"), Err(LspError::Json(_))));
        assert!(matches!(
            parse_text_edits("{}"),
            Err(LspError::Malformed { kind: "TextEdit[]", .. })
        ));
        assert!(matches!(
            parse_text_edits(r#"[{"newText": ""}]"#),
            Err(LspError::Malformed { kind: "TextEdit", .. })
        ));
        assert_eq!(parse_text_edits("[]").unwrap(), Vec::new());
    }

    #[test]
    fn test_apply_utf16_edits_to_crlf_document() {
        let doc = DocumentSnapshot::new(1, "é = 1;\r\nb = 2;\r\n");
        let edits = [
            LspTextEdit::new(
                LspRange::new(LspPosition::new(0, 4), LspPosition::new(0, 5)),
                "10",
            ),
            LspTextEdit::new(
                LspRange::new(LspPosition::new(1, 0), LspPosition::new(1, 1)),
                "c",
            ),
        ];
        assert_eq!(apply_text_edits(&doc, &edits), "é = 10;\r\nc = 2;\r\n");
    }

    #[test]
    fn test_apply_touching_edits_and_inserts() {
        let doc = DocumentSnapshot::new(1, "abcd\r\n");
        let range = |a, b| LspRange::new(LspPosition::new(0, a), LspPosition::new(0, b));
        let edits = [
            LspTextEdit::new(range(0, 2), "X"),
            LspTextEdit::new(range(2, 4), "Y"),
            LspTextEdit::new(range(4, 4), "1"),
            LspTextEdit::new(range(4, 4), "2"),
        ];
        assert_eq!(apply_text_edits(&doc, &edits), "XY12\r\n");
    }
}
