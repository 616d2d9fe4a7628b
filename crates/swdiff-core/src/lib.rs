//! Core comparison engine for swdiff.
//!
//! This crate implements a bounded-lookahead, single-pass line comparison:
//! two fixed-capacity windows slide over the input streams, identical lines
//! are paired up within the current windows, and every input line is emitted
//! exactly once as removed, added, or unchanged. Memory use is bounded by
//! the window capacity regardless of input size.
//!
//! This is deliberately *not* a longest-common-subsequence engine: the
//! matcher trades diff minimality for bounded memory and a single forward
//! pass over both inputs.
//!
//! # Key Types
//!
//! - [`WindowedLineMatcher`] — The comparison loop, an `Iterator` over [`DiffEvent`]
//! - [`DiffEvent`] — A classified output line (removed / added / unchanged)
//! - [`LineSource`] — The seam through which input text enters the matcher
//! - [`Window`] / [`Line`] — Bounded lookahead buffers and their records
//!
//! I/O-backed sources and presentation sinks live in `swdiff-io`; this crate
//! has no dependency on files, terminals, or colors.

pub mod error;
pub mod event;
pub mod matcher;
pub mod source;
pub mod window;

pub use error::SourceError;
pub use event::DiffEvent;
pub use matcher::{diff_lines, WindowedLineMatcher};
pub use source::{LineSource, MemorySource};
pub use window::{Line, Window, DEFAULT_CAPACITY};
