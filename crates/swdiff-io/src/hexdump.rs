//! Framed hex-dump rendering of byte chunks.

use std::io::Write;

use crate::error::IoResult;

/// Default dump width, in hex columns.
pub const DEFAULT_WIDTH: usize = 32;

/// Formats byte chunks as framed hex-dump lines.
///
/// Each output line shows up to `width / 2` bytes as space-separated
/// two-digit hex pairs, padded to a fixed column, followed by the
/// printable-ASCII rendering of the same bytes (non-printables as `.`),
/// padded to `width`. The first line of a chunk is framed with `|` bars;
/// continuation lines of the same chunk use `:`.
pub struct HexFormatter {
    width: usize,
}

impl HexFormatter {
    /// Create a formatter with the default width.
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// Create a formatter with an explicit width.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or odd.
    pub fn with_width(width: usize) -> Self {
        assert!(width > 0 && width % 2 == 0, "width must be a positive multiple of two");
        Self { width }
    }

    /// Render one chunk as dump lines.
    pub fn format_chunk(&self, chunk: &[u8]) -> Vec<String> {
        let per_line = self.width / 2;
        let hex_column = self.width + self.width / 2 - 1;
        let mut lines = Vec::new();
        let mut bar = '|';

        for group in chunk.chunks(per_line) {
            let hex = group
                .iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ");
            let ascii: String = group
                .iter()
                .map(|&byte| {
                    if (0x20..=0x7e).contains(&byte) {
                        byte as char
                    } else {
                        '.'
                    }
                })
                .collect();

            lines.push(format!(
                "{bar} {hex:<hex_column$}  {bar}  {ascii:<width$} {bar}",
                width = self.width,
            ));
            bar = ':';
        }

        lines
    }

    /// Render one chunk and write it, one dump line per output line.
    pub fn dump(&self, chunk: &[u8], out: &mut impl Write) -> IoResult<()> {
        for line in self.format_chunk(chunk) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl Default for HexFormatter {
    fn default() -> Self {
        Self::new()
    }
}
