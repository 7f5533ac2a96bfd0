//! `eolfmt` - inspect, detect and normalize line endings.
//!
//! Output goes to stdout; logs go to stderr and are filtered with `RUST_LOG`.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod cmd;
mod input;

#[derive(Parser)]
#[command(name = "eolfmt")]
#[command(about = "Line-ending statistics, detection and normalization", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count line terminators and report the dominant ending
    Stats(cmd::stats::StatsArgs),

    /// Print the dominant line ending (lf or crlf)
    Detect(cmd::detect::DetectArgs),

    /// Rewrite line endings and the final newline
    Normalize(cmd::normalize::NormalizeArgs),

    /// Trim trailing whitespace, re-indent and normalize line endings
    Format(cmd::format::FormatArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Stats(args) => cmd::stats::run(args),
        Commands::Detect(args) => cmd::detect::run(args),
        Commands::Normalize(args) => cmd::normalize::run(args),
        Commands::Format(args) => cmd::format::run(args),
    }
}
