use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "swdiff",
    about = "Sliding-window streaming line diff",
    version,
)]
pub struct Cli {
    /// Left-hand input file (removals come from here)
    pub left: PathBuf,

    /// Right-hand input file (additions come from here)
    pub right: PathBuf,

    /// Lookahead window capacity, in lines
    #[arg(long, default_value_t = swdiff_core::DEFAULT_CAPACITY)]
    pub window: usize,

    /// When to color the output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
