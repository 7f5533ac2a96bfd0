use std::path::PathBuf;

use clap::Args;
use eol_core::{EolStats, LineEnding, count_lines};
use serde_json::json;

use crate::input;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Input file (`-` or absent for stdin)
    pub file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> anyhow::Result<()> {
    let text = input::read_text(args.file.as_ref())?;
    println!("{}", render(&text, args.json)?);
    Ok(())
}

fn render(text: &str, as_json: bool) -> anyhow::Result<String> {
    let stats = EolStats::measure(text);
    let lines = count_lines(text);
    let ending = LineEnding::from_stats(&stats);

    if as_json {
        let value = json!({
            "stats": stats,
            "lines": lines,
            "lineEnding": ending,
            "mixed": stats.is_mixed(),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(format!(
        "lf              = {}\n\
         crlf            = {}\n\
         cr              = {}\n\
         final_newline   = {}\n\
         lines           = {}\n\
         line_ending     = {}\n\
         mixed           = {}",
        stats.lf,
        stats.crlf,
        stats.cr,
        stats.last_line_has_terminator,
        lines,
        ending,
        stats.is_mixed(),
    ))
}
