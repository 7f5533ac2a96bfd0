use eol_core_lsp::{
    DocumentSnapshot, FormattingSettings, LspPosition, LspRange, PositionEncoding, SettingsStore,
    apply_text_edits, format_document, text_edits_from_value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_format_with_per_document_settings() {
    let store = SettingsStore::new(FormattingSettings::default());
    store.merge_defaults(&json!({ "tabSize": 4, "eol": "crlf" }));
    store.set_document(
        "file:///Makefile",
        FormattingSettings::from_value(&json!({ "insertSpaces": false, "tabSize": 4 })),
    );

    let source = DocumentSnapshot::new(1, "main.rs:\n    cc main.rs   \n");
    let lib = format_document(&source, &store.settings_for("file:///lib.rs"));
    let make = format_document(&source, &store.settings_for("file:///Makefile"));

    assert_eq!(lib.len(), 1);
    assert_eq!(lib[0].new_text, "main.rs:\r\n    cc main.rs\r\n");
    assert_eq!(make[0].new_text, "main.rs:\n\tcc main.rs\n");

    // The edit covers the whole original document.
    assert_eq!(
        lib[0].range,
        LspRange::new(LspPosition::new(0, 0), LspPosition::new(2, 0))
    );
    assert_eq!(apply_text_edits(&source, &lib), lib[0].new_text);
}

#[test]
fn test_formatting_edits_roundtrip_through_json() {
    let doc = DocumentSnapshot::new(7, "x = 1  \r\ny = 2");
    let edits = format_document(&doc, &FormattingSettings::default());
    let wire = serde_json::to_value(&edits).unwrap();

    let parsed = text_edits_from_value(&wire);
    assert_eq!(parsed, edits);
    assert_eq!(apply_text_edits(&doc, &parsed), "x = 1\ny = 2\n");
}

#[test]
fn test_client_edits_in_utf8_encoding() {
    let doc = DocumentSnapshot::new(1, "naïve\r\ntext").with_encoding(PositionEncoding::Utf8);
    let edits = text_edits_from_value(&json!([
        {
            "range": { "start": { "line": 0, "character": 6 }, "end": { "line": 0, "character": 6 } },
            "newText": "!"
        },
        {
            "range": { "start": { "line": 1, "character": -2 }, "end": { "line": 1, "character": 4 } },
            "newText": "TEXT"
        }
    ]));
    assert_eq!(apply_text_edits(&doc, &edits), "naïve!\r\nTEXT");
}

#[test]
fn test_hover_word_on_crlf_document() {
    let doc = DocumentSnapshot::new(1, "let alpha = 1;\r\nlet beta = alpha;\r\n");
    let (word, range) = doc.word_at(LspPosition::new(1, 12)).unwrap();
    assert_eq!(word, "alpha");
    assert_eq!(
        range,
        LspRange::new(LspPosition::new(1, 11), LspPosition::new(1, 16))
    );
}
