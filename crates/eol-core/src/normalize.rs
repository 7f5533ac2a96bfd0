//! Line-ending normalization and output policy.
//!
//! Every function here is a pure transform. Functions that can often return their input
//! unchanged return [`Cow`] so the common "already normalized" case does not allocate.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::line_ending::{EolKind, LineEnding};
use crate::stats::EolStats;

/// Normalize every line terminator in `text` to `target`.
///
/// `"\r\n"` and lone `'\r'` collapse to `'\n'`; for [`EolKind::Crlf`] every resulting `'\n'`
/// is then written as `"\r\n"`. [`EolKind::Auto`] is a no-op: callers that want detection call
/// [`LineEnding::detect`] first and pass the concrete result.
///
/// Normalizing already normalized text returns it borrowed and unchanged.
pub fn normalize_eol(text: &str, target: EolKind) -> Cow<'_, str> {
    let Some(ending) = target.concrete() else {
        return Cow::Borrowed(text);
    };

    let stats = EolStats::measure(text);
    let already = match ending {
        LineEnding::Lf => stats.crlf == 0 && stats.cr == 0,
        LineEnding::Crlf => stats.lf == 0 && stats.cr == 0,
    };
    if already {
        return Cow::Borrowed(text);
    }

    Cow::Owned(rewrite_terminators(text, ending.as_str()))
}

/// Replace each terminator (`"\r\n"`, `'\n'` or `'\r'`) with `terminator`.
fn rewrite_terminators(text: &str, terminator: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        out.push_str(&rest[..pos]);
        out.push_str(terminator);
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
    }
    out.push_str(rest);
    out
}

/// Append the terminator for `eol` unless `text` already ends with it.
pub fn ensure_final_newline(text: &str, eol: LineEnding) -> Cow<'_, str> {
    if text.ends_with(eol.as_str()) {
        Cow::Borrowed(text)
    } else {
        let mut out = String::with_capacity(text.len() + 2);
        out.push_str(text);
        out.push_str(eol.as_str());
        Cow::Owned(out)
    }
}

/// Remove exactly one trailing terminator (`"\r\n"`, `'\n'` or `'\r'`), if any.
pub fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text)
}

/// How [`EolPolicy`] chooses the output line ending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolMode {
    /// Always write LF.
    Lf,
    /// Always write CRLF.
    Crlf,
    /// Write the ending detected in the input.
    #[default]
    Preserve,
}

/// Target line ending plus final-newline handling applied when writing text out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EolPolicy {
    /// How to choose the output line ending.
    pub mode: EolMode,
    /// Append a terminator unless the text already ends with one. Applied after stripping.
    pub ensure_final_newline: bool,
    /// Remove one trailing terminator.
    pub strip_final_newline: bool,
}

impl EolPolicy {
    /// A policy with a fixed mode and no final-newline handling.
    pub fn new(mode: EolMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Builder-style setter for [`EolPolicy::ensure_final_newline`].
    pub fn with_ensure_final_newline(mut self, ensure: bool) -> Self {
        self.ensure_final_newline = ensure;
        self
    }

    /// Builder-style setter for [`EolPolicy::strip_final_newline`].
    pub fn with_strip_final_newline(mut self, strip: bool) -> Self {
        self.strip_final_newline = strip;
        self
    }

    /// The concrete line ending this policy writes for `text`.
    pub fn target(&self, text: &str) -> LineEnding {
        match self.mode {
            EolMode::Lf => LineEnding::Lf,
            EolMode::Crlf => LineEnding::Crlf,
            EolMode::Preserve => LineEnding::detect(text),
        }
    }
}

/// Apply `policy` to `text`: normalize, then strip, then ensure the final newline.
///
/// Ensuring runs after stripping, so setting both leaves the text terminated.
pub fn apply_eol_policy(text: &str, policy: &EolPolicy) -> String {
    let target = policy.target(text);
    if policy.mode == EolMode::Preserve && tracing::enabled!(tracing::Level::DEBUG) {
        let stats = EolStats::measure(text);
        if stats.is_mixed() {
            debug!(?stats, %target, "mixed line endings, normalizing to dominant ending");
        }
    }

    let mut out = normalize_eol(text, target.into()).into_owned();
    if policy.strip_final_newline {
        let kept = strip_final_newline(&out).len();
        out.truncate(kept);
    }
    if policy.ensure_final_newline && !out.ends_with(target.as_str()) {
        out.push_str(target.as_str());
    }
    out
}

/// The terminator that ended a line produced by [`split_lines_with_delimiters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `'\n'`
    Lf,
    /// `"\r\n"`
    Crlf,
    /// A lone `'\r'`.
    Cr,
    /// No terminator: the final line of the text.
    End,
}

impl Delimiter {
    /// The delimiter text (empty for [`Delimiter::End`]).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Cr => "\r",
            Self::End => "",
        }
    }
}

/// One line of text together with the terminator that ended it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedLine<'a> {
    /// Line content, without its terminator.
    pub line: &'a str,
    /// The terminator that followed the content.
    pub delimiter: Delimiter,
}

/// Split `text` into lines, remembering each line's terminator.
///
/// The result is never empty and its last element always has [`Delimiter::End`] (an empty
/// line when the text ends with a terminator).
pub fn split_lines_with_delimiters(text: &str) -> Vec<DelimitedLine<'_>> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        let (delimiter, width) = if rest[pos..].starts_with("\r\n") {
            (Delimiter::Crlf, 2)
        } else if rest.as_bytes()[pos] == b'\r' {
            (Delimiter::Cr, 1)
        } else {
            (Delimiter::Lf, 1)
        };
        out.push(DelimitedLine {
            line: &rest[..pos],
            delimiter,
        });
        rest = &rest[pos + width..];
    }
    out.push(DelimitedLine {
        line: rest,
        delimiter: Delimiter::End,
    });
    out
}

/// Rejoin lines from [`split_lines_with_delimiters`], writing every present terminator as
/// `eol` (`Auto` writes LF) and keeping the presence or absence of the final terminator.
pub fn join_lines_preserve_last_terminator(parts: &[DelimitedLine<'_>], eol: EolKind) -> String {
    let separator = eol.separator();
    let mut out = String::new();
    for part in parts {
        out.push_str(part.line);
        if part.delimiter != Delimiter::End {
            out.push_str(separator);
        }
    }
    out
}

/// Split `text` into lines, accepting CRLF, LF and CR uniformly.
///
/// `n` terminators give `n + 1` lines, so text ending with a terminator yields a trailing
/// empty line. Empty text yields no lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    split_lines_with_delimiters(text)
        .into_iter()
        .map(|part| part.line)
        .collect()
}

/// Join `lines` with the terminator for `eol` (`Auto` joins with LF).
pub fn join_lines<S: AsRef<str>>(lines: &[S], eol: EolKind) -> String {
    let separator = eol.separator();
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(line.as_ref());
    }
    out
}
