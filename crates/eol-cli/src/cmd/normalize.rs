use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use eol_core::{ChunkNormalizer, EolMode, EolPolicy, LineEnding, apply_eol_policy};
use tracing::debug;

use super::ModeArg;
use crate::input;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Input file (`-` or absent for stdin)
    pub file: Option<PathBuf>,

    /// Output line ending
    #[arg(long, value_enum, default_value_t = ModeArg::Lf)]
    pub eol: ModeArg,

    /// Terminate the last line
    #[arg(long)]
    pub ensure_final_newline: bool,

    /// Remove one trailing line terminator (applied before --ensure-final-newline)
    #[arg(long)]
    pub strip_final_newline: bool,

    /// Process the input incrementally instead of reading it whole
    #[arg(long)]
    pub stream: bool,

    /// Read size in bytes when streaming
    #[arg(long, default_value_t = 64 * 1024, requires = "stream")]
    pub chunk_size: usize,
}

pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    if args.stream {
        let target = match args.eol {
            ModeArg::Lf => LineEnding::Lf,
            ModeArg::Crlf => LineEnding::Crlf,
            ModeArg::Preserve => bail!("--stream needs a fixed --eol (lf or crlf)"),
        };
        if args.ensure_final_newline || args.strip_final_newline {
            bail!("final-newline options are not supported with --stream");
        }
        let reader = input::open(args.file.as_ref())?;
        let mut out = io::BufWriter::new(io::stdout().lock());
        stream(reader, &mut out, target, args.chunk_size.max(1))?;
        out.flush().context("failed to write output")?;
        return Ok(());
    }

    let text = input::read_text(args.file.as_ref())?;
    let policy = EolPolicy::new(EolMode::from(args.eol))
        .with_ensure_final_newline(args.ensure_final_newline)
        .with_strip_final_newline(args.strip_final_newline);
    let mut out = io::stdout().lock();
    out.write_all(apply_eol_policy(&text, &policy).as_bytes())
        .context("failed to write output")?;
    Ok(())
}

/// Normalize `reader` into `writer` one read at a time.
fn stream(
    mut reader: impl Read,
    writer: &mut impl Write,
    target: LineEnding,
    chunk_size: usize,
) -> anyhow::Result<()> {
    let mut normalizer = ChunkNormalizer::with_target(target);
    let mut buf = vec![0u8; chunk_size];
    let mut chunks = 0usize;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err).context("failed to read input"),
        };
        writer
            .write_all(&normalizer.push_bytes(&buf[..n]))
            .context("failed to write output")?;
        chunks += 1;
    }
    writer
        .write_all(normalizer.finish().as_bytes())
        .context("failed to write output")?;
    debug!(chunks, %target, "stream normalized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Hands out the input a few bytes at a time.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn run_stream(input: &str, step: usize, target: LineEnding) -> String {
        let reader = Trickle {
            data: input.as_bytes(),
            step,
        };
        let mut out = Vec::new();
        stream(reader, &mut out, target, 4096).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_stream_matches_whole_buffer() {
        let input = "héllo\r\nwörld\rend\r";
        for step in 1..8 {
            assert_eq!(run_stream(input, step, LineEnding::Lf), "héllo\nwörld\nend\n");
            assert_eq!(
                run_stream(input, step, LineEnding::Crlf),
                "héllo\r\nwörld\r\nend\r\n"
            );
        }
    }
}
