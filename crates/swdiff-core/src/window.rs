//! Bounded lookahead buffers over a line source.
//!
//! A [`Window`] holds the next unconsumed lines of one stream, up to a fixed
//! capacity. The matcher pairs lines up across two windows, emits a prefix
//! of each, and the windows shift forward: evicted lines take their match
//! state with them, and fresh lines are pulled from the source to restore
//! capacity.
//!
//! # Invariants
//!
//! - `len() <= capacity()` at all times.
//! - Entries preserve stream order.
//! - A line's `matched` flag, once set, is never cleared while the line is
//!   buffered; it is dropped with the line on eviction.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::source::LineSource;

/// Default window capacity, in lines.
pub const DEFAULT_CAPACITY: usize = 100;

/// A buffered line awaiting classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// The line text, without its terminator.
    pub text: String,
    /// Whether an identical line was found in the opposite window.
    pub matched: bool,
}

impl Line {
    fn new(text: String) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

/// Bounded lookahead buffer of upcoming lines from one stream.
///
/// Backed by a ring buffer, so eviction at the front and refill at the back
/// are O(1) amortized.
pub struct Window {
    lines: VecDeque<Line>,
    capacity: usize,
    exhausted: bool,
    failure: Option<SourceError>,
}

impl Window {
    /// Create an empty window. Capacities below 1 are clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            exhausted: false,
            failure: None,
        }
    }

    /// Number of buffered lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no lines are buffered.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of buffered lines.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once the source has reported end-of-input (or a read
    /// failure, which is treated the same way).
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The first mid-stream read failure, if one occurred.
    pub fn failure(&self) -> Option<&SourceError> {
        self.failure.as_ref()
    }

    /// The line at the front of the window, if any.
    pub fn front(&self) -> Option<&Line> {
        self.lines.front()
    }

    /// The line at `index`, if buffered.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Pull lines from `source` until the window is full or the source is
    /// exhausted. A read failure is recorded once and treated as exhaustion;
    /// the lines already buffered remain valid.
    pub fn refill<S: LineSource>(&mut self, source: &mut S) {
        let before = self.lines.len();
        while self.lines.len() < self.capacity && !self.exhausted {
            match source.next_line() {
                Ok(Some(text)) => self.lines.push_back(Line::new(text)),
                Ok(None) => self.exhausted = true,
                Err(err) => {
                    warn!("treating read failure as end of input: {err}");
                    self.failure = Some(err);
                    self.exhausted = true;
                }
            }
        }
        let pulled = self.lines.len() - before;
        if pulled > 0 {
            debug!(pulled, buffered = self.lines.len(), "window refilled");
        }
    }

    /// Evict `count` lines from the front, dropping their match state.
    pub fn evict(&mut self, count: usize) {
        for _ in 0..count.min(self.lines.len()) {
            self.lines.pop_front();
        }
    }

    pub(crate) fn text(&self, index: usize) -> &str {
        &self.lines[index].text
    }

    pub(crate) fn is_matched(&self, index: usize) -> bool {
        self.lines[index].matched
    }

    pub(crate) fn mark_matched(&mut self, index: usize) {
        self.lines[index].matched = true;
    }

    /// Position of the first unmatched line with the given content.
    pub(crate) fn find_unmatched(&self, text: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| !line.matched && line.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn refill_respects_capacity() {
        let mut source = MemorySource::new(["a", "b", "c", "d", "e"]);
        let mut window = Window::new(3);
        window.refill(&mut source);

        assert_eq!(window.len(), 3);
        assert!(!window.is_exhausted());
        assert_eq!(window.front().unwrap().text, "a");
    }

    #[test]
    fn refill_detects_exhaustion() {
        let mut source = MemorySource::new(["a"]);
        let mut window = Window::new(3);
        window.refill(&mut source);

        assert_eq!(window.len(), 1);
        assert!(window.is_exhausted());
    }

    #[test]
    fn evict_then_refill_restores_capacity() {
        let mut source = MemorySource::new(["a", "b", "c", "d"]);
        let mut window = Window::new(2);
        window.refill(&mut source);
        window.evict(1);
        window.refill(&mut source);

        assert_eq!(window.len(), 2);
        assert_eq!(window.front().unwrap().text, "b");
        assert_eq!(window.get(1).unwrap().text, "c");
    }

    #[test]
    fn eviction_drops_match_state() {
        let mut source = MemorySource::new(["a", "b"]);
        let mut window = Window::new(2);
        window.refill(&mut source);
        window.mark_matched(0);
        window.evict(1);

        // The surviving line never carried the flag.
        assert!(!window.front().unwrap().matched);
    }

    #[test]
    fn find_unmatched_skips_matched_duplicates() {
        let mut source = MemorySource::new(["x", "x", "y"]);
        let mut window = Window::new(3);
        window.refill(&mut source);
        window.mark_matched(0);

        assert_eq!(window.find_unmatched("x"), Some(1));
        assert_eq!(window.find_unmatched("y"), Some(2));
        assert_eq!(window.find_unmatched("z"), None);
    }

    #[test]
    fn read_failure_is_recorded_and_exhausts() {
        struct Failing {
            yielded: bool,
        }
        impl LineSource for Failing {
            fn next_line(&mut self) -> Result<Option<String>, SourceError> {
                if self.yielded {
                    Err(SourceError::Other("boom".into()))
                } else {
                    self.yielded = true;
                    Ok(Some("first".into()))
                }
            }
        }

        let mut window = Window::new(4);
        window.refill(&mut Failing { yielded: false });

        assert_eq!(window.len(), 1);
        assert!(window.is_exhausted());
        assert!(window.failure().is_some());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let window = Window::new(0);
        assert_eq!(window.capacity(), 1);
    }
}
