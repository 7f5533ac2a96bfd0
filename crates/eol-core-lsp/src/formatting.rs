//! Whitespace and line-ending formatting pass.

use eol_core::{apply_eol_policy, split_lines_with_delimiters};
use tracing::debug;

use crate::document::DocumentSnapshot;
use crate::lsp_text_edits::LspTextEdit;
use crate::settings::FormattingSettings;

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Visual width of an indentation prefix, with tab stops every `tab_size` columns.
fn indent_width(indent: &str, tab_size: usize) -> usize {
    indent.chars().fold(0, |col, c| match c {
        '\t' => (col / tab_size + 1) * tab_size,
        _ => col + 1,
    })
}

fn reindent(indent: &str, settings: &FormattingSettings) -> String {
    let tab_size = settings.tab_size.max(1) as usize;
    let width = indent_width(indent, tab_size);
    let mut out = settings.indent_unit().repeat(width / tab_size);
    out.push_str(&" ".repeat(width % tab_size));
    out
}

/// Zero-based lines whose indentation mixes tabs and spaces.
pub fn mixed_indentation_lines(text: &str) -> Vec<usize> {
    split_lines_with_delimiters(text)
        .iter()
        .enumerate()
        .filter(|(_, part)| {
            let indent = leading_whitespace(part.line);
            indent.contains(' ') && indent.contains('\t')
        })
        .map(|(i, _)| i)
        .collect()
}

/// Format `text`: trim trailing whitespace, rewrite indentation, then apply the EOL policy.
pub fn format_text(text: &str, settings: &FormattingSettings) -> String {
    let mut out = String::with_capacity(text.len());
    for part in split_lines_with_delimiters(text) {
        let mut line = part.line;
        if settings.trim_trailing_whitespace {
            line = line.trim_end_matches([' ', '\t']);
        }
        let indent = leading_whitespace(line);
        out.push_str(&reindent(indent, settings));
        out.push_str(&line[indent.len()..]);
        out.push_str(part.delimiter.as_str());
    }
    apply_eol_policy(&out, &settings.eol_policy())
}

/// Formatting edits for `snapshot`.
///
/// Returns nothing when the document is already formatted, otherwise a single edit replacing
/// the whole document.
pub fn format_document(
    snapshot: &DocumentSnapshot,
    settings: &FormattingSettings,
) -> Vec<LspTextEdit> {
    if settings.detect_mixed_indentation {
        let mixed = mixed_indentation_lines(snapshot.text());
        if !mixed.is_empty() {
            debug!(
                version = snapshot.version(),
                lines = mixed.len(),
                first = mixed[0],
                "mixed indentation"
            );
        }
    }

    let formatted = format_text(snapshot.text(), settings);
    if formatted == snapshot.text() {
        return Vec::new();
    }
    vec![LspTextEdit::new(snapshot.full_range(), formatted)]
}
