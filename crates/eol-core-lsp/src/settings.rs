//! Formatting settings and the hot-reloadable settings store.
//!
//! Settings arrive as loosely-typed JSON (`workspace/didChangeConfiguration`, per-document
//! overrides). [`FormattingSettings::from_value`] validates each field on its own, so one bad
//! value does not discard the rest. [`SettingsStore`] holds one immutable
//! [`SettingsSnapshot`] and swaps it wholesale on every change; readers never observe a
//! half-applied update.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use eol_core::{EolKind, EolMode, EolPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Smallest accepted `tabSize`.
pub const MIN_TAB_SIZE: u32 = 1;
/// Largest accepted `tabSize`.
pub const MAX_TAB_SIZE: u32 = 16;

/// User-facing formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattingSettings {
    /// Width of one indentation level, in columns.
    pub tab_size: u32,
    /// Indent with spaces instead of tabs.
    pub insert_spaces: bool,
    /// Remove trailing spaces and tabs from every line.
    pub trim_trailing_whitespace: bool,
    /// Terminate the last line.
    pub insert_final_newline: bool,
    /// Output line ending; `auto` keeps the document's dominant ending.
    pub eol: EolKind,
    /// Report lines that indent with both tabs and spaces.
    pub detect_mixed_indentation: bool,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            tab_size: 2,
            insert_spaces: true,
            trim_trailing_whitespace: true,
            insert_final_newline: true,
            eol: EolKind::Lf,
            detect_mixed_indentation: true,
        }
    }
}

impl FormattingSettings {
    /// Settings from a (possibly partial) JSON object, starting from the defaults.
    pub fn from_value(value: &Value) -> Self {
        Self::default().merged(value)
    }

    /// A copy of `self` with every valid field of `value` applied.
    ///
    /// Unknown keys and values of the wrong type are ignored; `tabSize` is clamped into
    /// `1..=16`.
    pub fn merged(&self, value: &Value) -> Self {
        let mut out = self.clone();
        let Some(map) = value.as_object() else {
            trace!(%value, "ignoring non-object formatting settings");
            return out;
        };

        for (key, field) in map {
            let applied = match key.as_str() {
                "tabSize" => field.as_i64().map(|n| {
                    out.tab_size = n.clamp(MIN_TAB_SIZE.into(), MAX_TAB_SIZE.into()) as u32;
                }),
                "insertSpaces" => field.as_bool().map(|b| out.insert_spaces = b),
                "trimTrailingWhitespace" => {
                    field.as_bool().map(|b| out.trim_trailing_whitespace = b)
                }
                "insertFinalNewline" => field.as_bool().map(|b| out.insert_final_newline = b),
                "eol" => field.as_str().and_then(parse_eol).map(|eol| out.eol = eol),
                "detectMixedIndentation" => {
                    field.as_bool().map(|b| out.detect_mixed_indentation = b)
                }
                _ => None,
            };
            if applied.is_none() {
                trace!(key = key.as_str(), %field, "ignoring formatting setting");
            }
        }
        out
    }

    /// The end-of-line policy these settings imply.
    pub fn eol_policy(&self) -> EolPolicy {
        let mode = match self.eol {
            EolKind::Lf => EolMode::Lf,
            EolKind::Crlf => EolMode::Crlf,
            EolKind::Auto => EolMode::Preserve,
        };
        EolPolicy::new(mode).with_ensure_final_newline(self.insert_final_newline)
    }

    /// Text of one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size.max(1) as usize)
        } else {
            "\t".to_string()
        }
    }
}

fn parse_eol(name: &str) -> Option<EolKind> {
    match name {
        "lf" => Some(EolKind::Lf),
        "crlf" => Some(EolKind::Crlf),
        "auto" => Some(EolKind::Auto),
        _ => None,
    }
}

/// One immutable generation of settings: workspace defaults plus per-document overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSnapshot {
    /// Settings used for documents without an override.
    pub defaults: FormattingSettings,
    /// Overrides keyed by document URI.
    pub documents: HashMap<String, FormattingSettings>,
}

impl SettingsSnapshot {
    /// Settings in effect for `uri`.
    pub fn settings_for(&self, uri: &str) -> &FormattingSettings {
        self.documents.get(uri).unwrap_or(&self.defaults)
    }
}

/// Shared, hot-reloadable settings.
///
/// Every update builds a new [`SettingsSnapshot`] and publishes it atomically.
#[derive(Debug, Default)]
pub struct SettingsStore {
    snap: ArcSwap<SettingsSnapshot>,
}

impl SettingsStore {
    /// A store whose defaults are `defaults` and which has no overrides.
    pub fn new(defaults: FormattingSettings) -> Self {
        Self {
            snap: ArcSwap::from_pointee(SettingsSnapshot {
                defaults,
                documents: HashMap::new(),
            }),
        }
    }

    /// The current generation.
    pub fn current(&self) -> Arc<SettingsSnapshot> {
        self.snap.load_full()
    }

    /// Settings in effect for `uri`.
    pub fn settings_for(&self, uri: &str) -> FormattingSettings {
        self.snap.load().settings_for(uri).clone()
    }

    /// Replace everything with `snapshot`.
    pub fn replace(&self, snapshot: SettingsSnapshot) {
        debug!(
            overrides = snapshot.documents.len(),
            "replacing formatting settings"
        );
        self.snap.store(Arc::new(snapshot));
    }

    /// Replace the defaults, keeping overrides.
    pub fn update_defaults(&self, defaults: FormattingSettings) {
        debug!(?defaults, "updating default formatting settings");
        self.snap.rcu(|cur| {
            let mut next = SettingsSnapshot::clone(cur);
            next.defaults = defaults.clone();
            next
        });
    }

    /// Merge a JSON settings object onto the current defaults.
    pub fn merge_defaults(&self, value: &Value) {
        self.snap.rcu(|cur| {
            let mut next = SettingsSnapshot::clone(cur);
            next.defaults = cur.defaults.merged(value);
            next
        });
    }

    /// Set the override for `uri`.
    pub fn set_document(&self, uri: &str, settings: FormattingSettings) {
        self.snap.rcu(|cur| {
            let mut next = SettingsSnapshot::clone(cur);
            next.documents.insert(uri.to_string(), settings.clone());
            next
        });
    }

    /// Remove the override for `uri`, if any.
    pub fn clear_document(&self, uri: &str) {
        self.snap.rcu(|cur| {
            let mut next = SettingsSnapshot::clone(cur);
            next.documents.remove(uri);
            next
        });
    }

    /// Remove all overrides.
    pub fn clear_documents(&self) {
        self.snap.rcu(|cur| SettingsSnapshot {
            defaults: cur.defaults.clone(),
            documents: HashMap::new(),
        });
    }
}
