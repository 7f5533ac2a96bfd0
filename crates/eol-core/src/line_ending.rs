//! Line ending kinds and detection.
//!
//! [`LineEnding`] is what a text *is*: detection always answers LF or CRLF, never "auto".
//! [`EolKind`] is what a caller *asks for*: a concrete ending, or `Auto` to keep the input as-is.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::EolStats;

/// A concrete newline sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// The terminator text for this line ending.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }

    /// Detect the dominant line ending of `text`.
    ///
    /// Majority vote between CRLF pairs and bare terminators (LF plus lone CR). Ties, including
    /// text without any terminator, resolve to [`LineEnding::Lf`].
    pub fn detect(text: &str) -> Self {
        Self::from_stats(&EolStats::measure(text))
    }

    /// Majority vote over already measured statistics.
    pub fn from_stats(stats: &EolStats) -> Self {
        if stats.crlf > stats.lf + stats.cr {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Detect the dominant line ending, returning `tiebreak` unless one side wins by more than
    /// `bias` occurrences.
    ///
    /// Small files should not flip policy on a single stray terminator; a `bias` of `0`
    /// only routes exact ties to `tiebreak`.
    pub fn detect_with_bias(text: &str, bias: usize, tiebreak: LineEnding) -> Self {
        let stats = EolStats::measure(text);
        let bare = stats.lf + stats.cr;
        if stats.crlf.abs_diff(bare) <= bias {
            return tiebreak;
        }
        if stats.crlf > bare { Self::Crlf } else { Self::Lf }
    }

    /// Pick the line ending to write.
    ///
    /// A concrete `preferred` kind is returned verbatim. For [`EolKind::Auto`] the ending is
    /// detected from `source`, and `fallback` is used when detection is ambiguous (a tie,
    /// which includes text without terminators).
    pub fn choose_output(preferred: EolKind, source: &str, fallback: LineEnding) -> Self {
        match preferred.concrete() {
            Some(ending) => ending,
            None => Self::detect_with_bias(source, 0, fallback),
        }
    }

    /// Convert an LF-normalized text to this line ending.
    ///
    /// The input must not contain `'\r'`; this is not a general normalizer.
    pub fn expand_lf(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::Lf => Cow::Borrowed(text),
            Self::Crlf if !text.contains('\n') => Cow::Borrowed(text),
            Self::Crlf => Cow::Owned(text.replace('\n', "\r\n")),
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("lf"),
            Self::Crlf => f.write_str("crlf"),
        }
    }
}

/// A requested line ending: a concrete kind, or `Auto` to preserve the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolKind {
    /// Normalize to LF.
    #[default]
    Lf,
    /// Normalize to CRLF.
    Crlf,
    /// Keep whatever the text already uses.
    Auto,
}

impl EolKind {
    /// The concrete line ending, or `None` for [`EolKind::Auto`].
    pub fn concrete(self) -> Option<LineEnding> {
        match self {
            Self::Lf => Some(LineEnding::Lf),
            Self::Crlf => Some(LineEnding::Crlf),
            Self::Auto => None,
        }
    }

    /// The separator used when joining lines (`Auto` joins with LF).
    pub fn separator(self) -> &'static str {
        self.concrete().unwrap_or(LineEnding::Lf).as_str()
    }
}

impl From<LineEnding> for EolKind {
    fn from(ending: LineEnding) -> Self {
        match ending {
            LineEnding::Lf => Self::Lf,
            LineEnding::Crlf => Self::Crlf,
        }
    }
}

impl fmt::Display for EolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("lf"),
            Self::Crlf => f.write_str("crlf"),
            Self::Auto => f.write_str("auto"),
        }
    }
}
