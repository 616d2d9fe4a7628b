//! Buffered byte and line readers over files and pipes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use swdiff_core::{LineSource, SourceError};

use crate::error::{IoError, IoResult};

const RAW_BUFFER_SIZE: usize = 4 * 1024;

/// Default chunk delimiters: newline, carriage return, NUL.
pub const DEFAULT_EDGE_BYTES: &[u8] = &[b'\n', b'\r', b'\0'];

/// Buffered byte reader with single-byte peek and delimiter-aware chunking.
///
/// Reads the underlying stream in 4 KiB blocks. Two consumption modes sit
/// on top of the byte cursor:
///
/// - [`read_chunk`](Self::read_chunk) / [`read_until`](Self::read_until) —
///   a chunk runs up to and including a run of edge bytes; consecutive
///   terminators such as `\r\n` are coalesced into the same chunk.
/// - [`read_line`](Self::read_line) — a line runs up to a single `\n`
///   (excluded), with a trailing `\r` stripped. Blank lines are preserved.
#[derive(Debug)]
pub struct ChunkReader<R: Read> {
    inner: R,
    raw: Vec<u8>,
    pos: usize,
    held: Option<u8>,
    eof: bool,
}

impl ChunkReader<File> {
    /// Open a file for chunked reading.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IoError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened for chunked reading");
        Ok(Self::new(file))
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wrap an arbitrary reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            raw: Vec::new(),
            pos: 0,
            held: None,
            eof: false,
        }
    }

    fn next_raw_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pos >= self.raw.len() && !self.eof {
            self.raw.resize(RAW_BUFFER_SIZE, 0);
            let read = self.inner.read(&mut self.raw)?;
            if read == 0 {
                self.eof = true;
                self.raw.clear();
            } else {
                self.raw.truncate(read);
            }
            self.pos = 0;
        }
        if self.pos < self.raw.len() {
            let byte = self.raw[self.pos];
            self.pos += 1;
            Ok(Some(byte))
        } else {
            Ok(None)
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.held.is_none() {
            self.held = self.next_raw_byte()?;
        }
        Ok(self.held)
    }

    /// Consume and return the next byte.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.held.take() {
            return Ok(Some(byte));
        }
        self.next_raw_byte()
    }

    /// Returns `true` once the stream and all buffered bytes are consumed.
    pub fn is_eof(&self) -> bool {
        self.eof && self.pos >= self.raw.len() && self.held.is_none()
    }

    /// Read a chunk terminated by a run of the given edge bytes.
    ///
    /// The terminators are included in the chunk, and consecutive edge bytes
    /// (such as `\r\n`) are coalesced into the same chunk. Returns an empty
    /// chunk at end of input.
    pub fn read_until(&mut self, edge_bytes: &[u8]) -> io::Result<Vec<u8>> {
        let mut chunk = Vec::new();
        while let Some(byte) = self.read_byte()? {
            chunk.push(byte);
            if edge_bytes.contains(&byte) {
                while let Some(next) = self.peek()? {
                    if !edge_bytes.contains(&next) {
                        break;
                    }
                    chunk.push(next);
                    self.read_byte()?;
                }
                break;
            }
        }
        Ok(chunk)
    }

    /// Read a chunk terminated by the default edge bytes.
    pub fn read_chunk(&mut self) -> io::Result<Vec<u8>> {
        self.read_until(DEFAULT_EDGE_BYTES)
    }

    /// Drain whatever is left in the stream.
    pub fn read_remaining(&mut self) -> io::Result<Vec<u8>> {
        let mut rest = Vec::new();
        while let Some(byte) = self.read_byte()? {
            rest.push(byte);
        }
        Ok(rest)
    }

    /// Read one line, without its terminator.
    ///
    /// A line ends at `\n`; a trailing `\r` is stripped so CRLF input reads
    /// the same as LF input. Returns `Ok(None)` at end of input. The last
    /// line of a stream without a trailing newline is still produced.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut saw_any = false;
        while let Some(byte) = self.read_byte()? {
            saw_any = true;
            if byte == b'\n' {
                break;
            }
            line.push(byte);
        }
        if !saw_any {
            return Ok(None);
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// File/pipe-backed line source built on [`ChunkReader`].
///
/// Produces lines without terminators, decoding bytes as UTF-8 with lossy
/// replacement so binary-ish input degrades instead of failing. A read
/// failure is surfaced as a [`SourceError`]; end of input is `Ok(None)`.
#[derive(Debug)]
pub struct ChunkLineSource<R: Read> {
    reader: ChunkReader<R>,
}

impl ChunkLineSource<File> {
    /// Open a file as a line source.
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        Ok(Self {
            reader: ChunkReader::open(path)?,
        })
    }
}

impl<R: Read> ChunkLineSource<R> {
    /// Wrap an arbitrary reader.
    pub fn new(inner: R) -> Self {
        Self {
            reader: ChunkReader::new(inner),
        }
    }
}

impl<R: Read> LineSource for ChunkLineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let line = self.reader.read_line().map_err(SourceError::Io)?;
        Ok(line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    fn reader(bytes: &[u8]) -> ChunkReader<Cursor<Vec<u8>>> {
        ChunkReader::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn peek_does_not_consume() {
        let mut r = reader(b"ab");
        assert_eq!(r.peek().unwrap(), Some(b'a'));
        assert_eq!(r.peek().unwrap(), Some(b'a'));
        assert_eq!(r.read_byte().unwrap(), Some(b'a'));
        assert_eq!(r.read_byte().unwrap(), Some(b'b'));
        assert_eq!(r.read_byte().unwrap(), None);
        assert!(r.is_eof());
    }

    #[test]
    fn chunks_coalesce_consecutive_terminators() {
        let mut r = reader(b"one\r\ntwo\n");
        assert_eq!(r.read_chunk().unwrap(), b"one\r\n");
        assert_eq!(r.read_chunk().unwrap(), b"two\n");
        assert_eq!(r.read_chunk().unwrap(), b"");
    }

    #[test]
    fn chunk_without_terminator_reads_to_eof() {
        let mut r = reader(b"tail");
        assert_eq!(r.read_chunk().unwrap(), b"tail");
        assert!(r.is_eof());
    }

    #[test]
    fn read_remaining_drains_everything() {
        let mut r = reader(b"abc\ndef");
        assert_eq!(r.read_chunk().unwrap(), b"abc\n");
        assert_eq!(r.read_remaining().unwrap(), b"def");
        assert_eq!(r.read_remaining().unwrap(), b"");
    }

    #[test]
    fn lines_preserve_blanks_and_strip_crlf() {
        let mut r = reader(b"a\n\nb\r\nc");
        assert_eq!(r.read_line().unwrap(), Some(b"a".to_vec()));
        assert_eq!(r.read_line().unwrap(), Some(b"".to_vec()));
        assert_eq!(r.read_line().unwrap(), Some(b"b".to_vec()));
        assert_eq!(r.read_line().unwrap(), Some(b"c".to_vec()));
        assert_eq!(r.read_line().unwrap(), None);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let mut r = reader(b"a\n");
        assert_eq!(r.read_line().unwrap(), Some(b"a".to_vec()));
        assert_eq!(r.read_line().unwrap(), None);
    }

    #[test]
    fn spans_raw_buffer_boundary() {
        // A line longer than the internal block size must come out whole.
        let long = vec![b'x'; RAW_BUFFER_SIZE + 100];
        let mut input = long.clone();
        input.push(b'\n');
        input.extend_from_slice(b"next\n");

        let mut r = reader(&input);
        assert_eq!(r.read_line().unwrap(), Some(long));
        assert_eq!(r.read_line().unwrap(), Some(b"next".to_vec()));
    }

    #[test]
    fn line_source_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha\nbeta\n").unwrap();

        let mut source = ChunkLineSource::open(file.path()).unwrap();
        assert_eq!(source.next_line().unwrap(), Some("alpha".into()));
        assert_eq!(source.next_line().unwrap(), Some("beta".into()));
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn open_failure_is_reported_at_the_boundary() {
        let err = ChunkLineSource::open("/nonexistent/swdiff-test-input").unwrap_err();
        assert!(matches!(err, IoError::Open { .. }));
    }

    #[test]
    fn invalid_utf8_degrades_lossily() {
        let mut source = ChunkLineSource::new(Cursor::new(b"ok\nbad\xff\n".to_vec()));
        assert_eq!(source.next_line().unwrap(), Some("ok".into()));
        let line = source.next_line().unwrap().unwrap();
        assert!(line.starts_with("bad"));
    }
}
