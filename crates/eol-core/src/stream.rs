//! Streaming normalization for chunked input.
//!
//! Data arriving in pieces (piped process output, socket reads) can split a `"\r\n"` pair across
//! two chunks. One carried bit, [`ChunkState`], resolves the split: a chunk ending in `'\r'`
//! holds that CR back until the next chunk shows whether a `'\n'` follows.
//!
//! The byte variant accepts chunks cut anywhere, including inside a multi-byte UTF-8 sequence:
//! `'\r'` and `'\n'` are ASCII and never occur inside one.

use std::borrow::Cow;

use crate::line_ending::LineEnding;

/// State carried between the chunks of one logical stream.
///
/// Each stream owns its own state; start a new stream with [`ChunkState::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkState {
    carry_cr: bool,
}

impl ChunkState {
    /// Fresh state for a new stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the previous chunk ended with a `'\r'` that has not been emitted yet.
    pub fn is_carrying_cr(&self) -> bool {
        self.carry_cr
    }

    /// Output owed at end of stream: a carried CR was a standalone terminator.
    pub fn flush(self) -> &'static str {
        if self.carry_cr { "\n" } else { "" }
    }
}

/// Normalize one chunk of a byte stream to LF.
///
/// Returns the output for this chunk and the state for the next call. An empty chunk changes
/// nothing, so a pending CR stays pending.
pub fn normalize_bytes_to_lf(chunk: &[u8], state: ChunkState) -> (Vec<u8>, ChunkState) {
    let mut out = Vec::with_capacity(chunk.len() + 1);
    if chunk.is_empty() {
        return (out, state);
    }

    let mut i = 0;
    if state.carry_cr {
        // Either way the carried CR becomes one LF; a leading LF completes the pair.
        out.push(b'\n');
        if chunk[0] == b'\n' {
            i = 1;
        }
    }

    let mut next = ChunkState::default();
    while i < chunk.len() {
        match chunk[i] {
            b'\r' => match chunk.get(i + 1) {
                Some(b'\n') => {
                    out.push(b'\n');
                    i += 1;
                }
                Some(_) => out.push(b'\n'),
                None => next.carry_cr = true,
            },
            byte => out.push(byte),
        }
        i += 1;
    }
    (out, next)
}

/// Normalize one chunk of a text stream to LF.
///
/// Same contract as [`normalize_bytes_to_lf`]; only `'\r'` is ever held back, so the output
/// of a `&str` chunk is always valid UTF-8.
pub fn normalize_chunk_to_lf(chunk: &str, state: ChunkState) -> (String, ChunkState) {
    let mut out = String::with_capacity(chunk.len() + 1);
    if chunk.is_empty() {
        return (out, state);
    }

    let mut rest = chunk;
    if state.carry_cr {
        out.push('\n');
        rest = rest.strip_prefix('\n').unwrap_or(rest);
    }

    let mut next = ChunkState::default();
    while let Some(pos) = rest.find('\r') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if after.is_empty() {
            next.carry_cr = true;
            rest = after;
            break;
        }
        out.push('\n');
        rest = after.strip_prefix('\n').unwrap_or(after);
    }
    out.push_str(rest);
    (out, next)
}

/// Convert an LF-only chunk to `target`.
///
/// Assumes the chunk is already LF-canonical (no `'\r'`); pair it with the normalizers above.
pub fn expand_lf_chunk(chunk: &str, target: LineEnding) -> Cow<'_, str> {
    target.expand_lf(chunk)
}

/// Owning wrapper that threads a [`ChunkState`] through a stream.
#[derive(Debug, Clone, Default)]
pub struct ChunkNormalizer {
    state: ChunkState,
    target: LineEnding,
}

impl ChunkNormalizer {
    /// A normalizer producing LF output.
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer producing `target` output.
    pub fn with_target(target: LineEnding) -> Self {
        Self {
            state: ChunkState::default(),
            target,
        }
    }

    /// The current carried state.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Normalize the next chunk of text.
    pub fn push(&mut self, chunk: &str) -> String {
        let (out, state) = normalize_chunk_to_lf(chunk, self.state);
        self.state = state;
        self.expand(out)
    }

    /// Normalize the next chunk of bytes.
    pub fn push_bytes(&mut self, chunk: &[u8]) -> Vec<u8> {
        let (out, state) = normalize_bytes_to_lf(chunk, self.state);
        self.state = state;
        match self.target {
            LineEnding::Lf => out,
            LineEnding::Crlf => {
                let mut expanded = Vec::with_capacity(out.len() + out.len() / 16);
                for byte in out {
                    if byte == b'\n' {
                        expanded.push(b'\r');
                    }
                    expanded.push(byte);
                }
                expanded
            }
        }
    }

    /// End the stream, emitting a pending standalone CR.
    pub fn finish(self) -> String {
        self.target.expand_lf(self.state.flush()).into_owned()
    }

    fn expand(&self, out: String) -> String {
        match self.target {
            LineEnding::Lf => out,
            LineEnding::Crlf => out.replace('\n', "\r\n"),
        }
    }
}
