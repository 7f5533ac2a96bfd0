use std::path::PathBuf;

use clap::Args;
use eol_core::LineEnding;

use super::EndingArg;
use crate::input;

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Input file (`-` or absent for stdin)
    pub file: Option<PathBuf>,

    /// Answer the tiebreak unless one side wins by more than this many terminators
    #[arg(long, default_value_t = 0)]
    pub bias: usize,

    /// Ending reported when the vote is within the bias
    #[arg(long, value_enum, default_value_t = EndingArg::Lf)]
    pub tiebreak: EndingArg,
}

pub fn run(args: DetectArgs) -> anyhow::Result<()> {
    let text = input::read_text(args.file.as_ref())?;
    println!(
        "{}",
        LineEnding::detect_with_bias(&text, args.bias, args.tiebreak.into())
    );
    Ok(())
}
