//! Line-ending statistics.
//!
//! A single forward pass over the bytes of a text counts every terminator exactly once:
//! a `"\r\n"` pair is one CRLF (never also an LF), a `'\r'` not followed by `'\n'` is a bare CR,
//! and any remaining `'\n'` is an LF.

use serde::{Deserialize, Serialize};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Counts of line terminators found in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EolStats {
    /// Number of `'\n'` characters that are not part of a CRLF pair.
    pub lf: usize,
    /// Number of `"\r\n"` pairs.
    pub crlf: usize,
    /// Number of lone `'\r'` characters (classic Mac style).
    pub cr: usize,
    /// Whether the text ends with `'\n'` or `'\r'`.
    pub last_line_has_terminator: bool,
}

impl EolStats {
    /// Scan `text` once and count its line terminators.
    pub fn measure(text: &str) -> Self {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return Self::default();
        }

        // No CR at all: only LF can occur.
        if !bytes.contains(&CR) {
            return Self {
                lf: bytes.iter().filter(|&&b| b == LF).count(),
                crlf: 0,
                cr: 0,
                last_line_has_terminator: bytes.last() == Some(&LF),
            };
        }

        let mut stats = Self::default();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                CR if bytes.get(i + 1) == Some(&LF) => {
                    stats.crlf += 1;
                    i += 1;
                }
                CR => stats.cr += 1,
                LF => stats.lf += 1,
                _ => {}
            }
            i += 1;
        }
        stats.last_line_has_terminator = is_terminated(text);
        stats
    }

    /// Total number of terminators of any kind.
    pub fn terminators(&self) -> usize {
        self.lf + self.crlf + self.cr
    }

    /// `true` if CRLF pairs coexist with bare LF or bare CR terminators.
    pub fn is_mixed(&self) -> bool {
        self.crlf > 0 && (self.lf > 0 || self.cr > 0)
    }
}

/// Shorthand for [`EolStats::measure`].
pub fn measure_eol(text: &str) -> EolStats {
    EolStats::measure(text)
}

/// `true` if `text` mixes CRLF with bare LF or CR line endings.
pub fn has_mixed_eol(text: &str) -> bool {
    EolStats::measure(text).is_mixed()
}

/// Number of logical lines in `text`.
///
/// Empty text has one (empty) line. A CRLF pair ends one line, the same way [`EolStats`]
/// counts it once.
pub fn count_lines(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut lines = 1;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            CR => {
                if bytes.get(i + 1) == Some(&LF) {
                    i += 1;
                }
                lines += 1;
            }
            LF => lines += 1,
            _ => {}
        }
        i += 1;
    }
    lines
}

/// `true` if `text` ends with `'\n'` or `'\r'`.
pub fn is_terminated(text: &str) -> bool {
    text.ends_with('\n') || text.ends_with('\r')
}
