//! swchunk: dump a file chunk-by-chunk as a framed hex listing.
//!
//! Chunks are delimited by runs of edge bytes (newline, carriage return,
//! NUL), so line-structured files dump one record per chunk and binary
//! tails without any delimiter still come out at the end.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use swdiff_io::{ChunkReader, HexFormatter, IoError};

#[derive(Parser)]
#[command(
    name = "swchunk",
    about = "Hex-dump a file chunk-by-chunk",
    version,
)]
struct Cli {
    /// Input file to dump; with no input, usage is shown
    input: Option<PathBuf>,

    /// Write output to the named file instead of stdout
    #[arg(short = 'O', long = "output", value_name = "FILE", conflicts_with = "auto_output")]
    output: Option<PathBuf>,

    /// Write output to `<input>.chunk`
    #[arg(short = 'o', long = "auto-output")]
    auto_output: bool,

    /// Dump width in hex columns (must be even)
    #[arg(long, default_value_t = swdiff_io::DEFAULT_WIDTH)]
    width: usize,
}

impl Cli {
    fn output_path(&self, input: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.output {
            Some(path.clone())
        } else if self.auto_output {
            let mut name = input.as_os_str().to_owned();
            name.push(".chunk");
            Some(PathBuf::from(name))
        } else {
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let Some(input) = &cli.input else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if cli.width == 0 || cli.width % 2 != 0 {
        anyhow::bail!("--width must be a positive multiple of two");
    }

    let mut writer: Box<dyn Write> = match cli.output_path(input) {
        Some(path) => Box::new(File::create(&path).map_err(|source| IoError::Open {
            path,
            source,
        })?),
        None => Box::new(io::stdout().lock()),
    };

    let mut reader = ChunkReader::open(input)?;
    let formatter = HexFormatter::with_width(cli.width);

    loop {
        let chunk = reader.read_chunk()?;
        if chunk.is_empty() {
            break;
        }
        formatter.dump(&chunk, &mut writer)?;
    }

    // A trailing run without any edge byte still gets dumped.
    let remaining = reader.read_remaining()?;
    if !remaining.is_empty() {
        formatter.dump(&remaining, &mut writer)?;
    }

    writer.flush()?;
    Ok(())
}
