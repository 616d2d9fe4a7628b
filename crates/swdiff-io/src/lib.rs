//! I/O plumbing around the swdiff core: where bytes become lines and
//! classified lines become presentation.
//!
//! The core matcher in `swdiff-core` only ever sees the [`LineSource`] and
//! sink seams; everything platform-flavored lives here.
//!
//! # Key Types
//!
//! - [`ChunkReader`] — Buffered byte reader with peek and edge-byte-delimited chunks
//! - [`ChunkLineSource`] — File/pipe-backed `LineSource` built on the chunk reader
//! - [`HexFormatter`] — Framed hex-dump rendering of byte chunks
//! - [`EventSink`] / [`TextSink`] / [`JsonSink`] — Presentation of classified lines
//! - [`IoError`] — Open/write failures, reported once at the boundary
//!
//! [`LineSource`]: swdiff_core::LineSource

pub mod error;
pub mod hexdump;
pub mod reader;
pub mod sink;

pub use error::{IoError, IoResult};
pub use hexdump::{HexFormatter, DEFAULT_WIDTH};
pub use reader::{ChunkLineSource, ChunkReader, DEFAULT_EDGE_BYTES};
pub use sink::{EventSink, JsonSink, TextSink};
