//! Output sinks: where classified lines leave the system.

use std::io::Write;

use colored::Colorize;

use swdiff_core::DiffEvent;

use crate::error::IoResult;

/// Consumer of classified diff lines.
///
/// Sinks own presentation entirely; the matcher never knows whether its
/// events become colored text, JSON, or something else.
pub trait EventSink {
    /// Render one classified line.
    fn emit(&mut self, event: &DiffEvent) -> IoResult<()>;

    /// Flush any buffered output. Called once, after the last event.
    fn finish(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Plain-text sink: `- ` removals (red), `+ ` additions (green), two-space
/// unchanged lines, one event per output line, newline-terminated.
///
/// Color is a per-sink option rather than global console state; with color
/// disabled the same prefixes are emitted without escape codes.
pub struct TextSink<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TextSink<W> {
    /// Create an uncolored text sink.
    pub fn new(writer: W) -> Self {
        Self::with_color(writer, false)
    }

    /// Create a text sink with color explicitly enabled or disabled.
    pub fn with_color(writer: W, color: bool) -> Self {
        Self { writer, color }
    }
}

impl<W: Write> EventSink for TextSink<W> {
    fn emit(&mut self, event: &DiffEvent) -> IoResult<()> {
        let line = format!("{}{}", event.prefix(), event.text());
        if self.color {
            match event {
                DiffEvent::Removed(_) => writeln!(self.writer, "{}", line.red())?,
                DiffEvent::Added(_) => writeln!(self.writer, "{}", line.green())?,
                DiffEvent::Unchanged(_) => writeln!(self.writer, "{line}")?,
            }
        } else {
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Structured sink: one JSON object per event, one per line.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    /// Create a JSON sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> EventSink for JsonSink<W> {
    fn emit(&mut self, event: &DiffEvent) -> IoResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<DiffEvent> {
        vec![
            DiffEvent::Unchanged("ctx".into()),
            DiffEvent::Removed("old".into()),
            DiffEvent::Added("new".into()),
        ]
    }

    #[test]
    fn text_sink_prefixes_lines() {
        let mut out = Vec::new();
        let mut sink = TextSink::new(&mut out);
        for event in events() {
            sink.emit(&event).unwrap();
        }
        sink.finish().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "  ctx\n- old\n+ new\n");
    }

    #[test]
    fn colored_removal_wraps_in_escapes() {
        colored::control::set_override(true);
        let mut out = Vec::new();
        let mut sink = TextSink::with_color(&mut out, true);
        sink.emit(&DiffEvent::Removed("x".into())).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("\u{1b}["));
        assert!(rendered.contains("- x"));
    }

    #[test]
    fn unchanged_lines_are_never_colored() {
        colored::control::set_override(true);
        let mut out = Vec::new();
        let mut sink = TextSink::with_color(&mut out, true);
        sink.emit(&DiffEvent::Unchanged("x".into())).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "  x\n");
    }

    #[test]
    fn json_sink_one_object_per_line() {
        let mut out = Vec::new();
        let mut sink = JsonSink::new(&mut out);
        for event in events() {
            sink.emit(&event).unwrap();
        }

        let rendered = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "unchanged");
        assert_eq!(first["text"], "ctx");
    }
}
