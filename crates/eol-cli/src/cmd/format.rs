use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use eol_core_lsp::{
    DocumentSnapshot, FormattingSettings, apply_text_edits, format_document,
    mixed_indentation_lines,
};
use serde_json::Value;
use tracing::warn;

use crate::input;

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Input file (`-` or absent for stdin)
    pub file: Option<PathBuf>,

    /// JSON file with formatting settings (tabSize, insertSpaces, eol, ...)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Print nothing and fail if the input is not already formatted
    #[arg(long)]
    pub check: bool,
}

pub fn run(args: FormatArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => FormattingSettings::default(),
    };
    let text = input::read_text(args.file.as_ref())?;
    let formatted = format(&text, &settings);

    if args.check {
        if formatted != text {
            bail!("input is not formatted");
        }
        return Ok(());
    }

    io::stdout()
        .lock()
        .write_all(formatted.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn load_settings(path: &Path) -> anyhow::Result<FormattingSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings JSON in {}", path.display()))?;
    Ok(FormattingSettings::from_value(&value))
}

fn format(text: &str, settings: &FormattingSettings) -> String {
    if settings.detect_mixed_indentation {
        for line in mixed_indentation_lines(text) {
            warn!(line = line + 1, "mixed tabs and spaces in indentation");
        }
    }

    let doc = DocumentSnapshot::new(0, text);
    let edits = format_document(&doc, settings);
    if edits.is_empty() {
        return text.to_string();
    }
    apply_text_edits(&doc, &edits)
}
