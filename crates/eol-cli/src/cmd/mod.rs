pub mod detect;
pub mod format;
pub mod normalize;
pub mod stats;

use clap::ValueEnum;
use eol_core::{EolMode, LineEnding};

/// A concrete line ending on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndingArg {
    Lf,
    Crlf,
}

impl From<EndingArg> for LineEnding {
    fn from(arg: EndingArg) -> Self {
        match arg {
            EndingArg::Lf => LineEnding::Lf,
            EndingArg::Crlf => LineEnding::Crlf,
        }
    }
}

/// Output line ending for `normalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Lf,
    Crlf,
    /// Keep the input's dominant ending
    Preserve,
}

impl From<ModeArg> for EolMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Lf => EolMode::Lf,
            ModeArg::Crlf => EolMode::Crlf,
            ModeArg::Preserve => EolMode::Preserve,
        }
    }
}
