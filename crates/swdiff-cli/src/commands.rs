use std::io::{self, IsTerminal};

use tracing::warn;

use swdiff_core::WindowedLineMatcher;
use swdiff_io::{ChunkLineSource, EventSink, JsonSink, TextSink};

use crate::cli::{Cli, ColorMode, OutputFormat};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    // Both sources must open before any output is produced; an unopenable
    // file fails the whole comparison with a single message and exit 1.
    let left = ChunkLineSource::open(&cli.left)?;
    let right = ChunkLineSource::open(&cli.right)?;

    let color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(color);

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn EventSink> = match cli.format {
        OutputFormat::Text => Box::new(TextSink::with_color(stdout, color)),
        OutputFormat::Json => Box::new(JsonSink::new(stdout)),
    };

    let mut matcher = WindowedLineMatcher::with_capacity(left, right, cli.window);
    for event in matcher.by_ref() {
        sink.emit(&event)?;
    }
    sink.finish()?;

    let (left_failure, right_failure) = matcher.read_failures();
    if let Some(err) = left_failure {
        warn!(path = %cli.left.display(), "input truncated by read failure: {err}");
    }
    if let Some(err) = right_failure {
        warn!(path = %cli.right.display(), "input truncated by read failure: {err}");
    }

    Ok(())
}
