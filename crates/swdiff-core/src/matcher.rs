//! The windowed line matcher: bounded-lookahead streaming comparison.
//!
//! Two [`Window`]s slide over the input streams. Each round, identical lines
//! are paired up within the current windows (first match wins, earliest
//! position in the opposite window breaks ties), the unmatched prefix of
//! each window is emitted as removals/additions, and at most one aligned
//! matched pair is emitted as unchanged. The consumed prefix is evicted and
//! both windows refill from their sources.
//!
//! A matched pair that is not aligned at both window fronts simultaneously
//! is left in place; alignment resolves on a later round as the windows
//! shift. If a round would otherwise emit nothing while lines remain
//! buffered, the front line of each non-empty window is force-emitted, so
//! every round consumes at least one line and the loop terminates after at
//! most `lines(left) + lines(right)` rounds.

use std::collections::VecDeque;

use crate::error::SourceError;
use crate::event::DiffEvent;
use crate::source::{LineSource, MemorySource};
use crate::window::{Window, DEFAULT_CAPACITY};

/// Streaming comparison of two line sources.
///
/// An `Iterator` over [`DiffEvent`]: every input line appears in exactly one
/// event, and the relative order of each stream's lines is preserved in the
/// output. Memory use is bounded by the window capacity.
///
/// Sources are pulled lazily; nothing is read until the first call to
/// [`next`](Iterator::next).
pub struct WindowedLineMatcher<L: LineSource, R: LineSource> {
    left_source: L,
    right_source: R,
    left: Window,
    right: Window,
    pending: VecDeque<DiffEvent>,
    rounds: usize,
    primed: bool,
}

impl<L: LineSource, R: LineSource> WindowedLineMatcher<L, R> {
    /// Create a matcher with the default window capacity.
    pub fn new(left: L, right: R) -> Self {
        Self::with_capacity(left, right, DEFAULT_CAPACITY)
    }

    /// Create a matcher with an explicit per-window capacity (in lines).
    /// Capacities below 1 are clamped to 1.
    pub fn with_capacity(left: L, right: R, capacity: usize) -> Self {
        Self {
            left_source: left,
            right_source: right,
            left: Window::new(capacity),
            right: Window::new(capacity),
            pending: VecDeque::new(),
            rounds: 0,
            primed: false,
        }
    }

    /// Mid-stream read failures encountered so far, left and right.
    ///
    /// A failed source is treated as exhausted: its buffered lines are still
    /// flushed, then the comparison completes normally. Callers that want to
    /// surface the truncation can check here after iteration.
    pub fn read_failures(&self) -> (Option<&SourceError>, Option<&SourceError>) {
        (self.left.failure(), self.right.failure())
    }

    /// Number of comparison rounds run so far. Bounded by the total number
    /// of input lines.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Pair up identical lines across the current windows.
    ///
    /// Each unmatched left line, in order, claims the first unmatched right
    /// line with identical content. Flags survive across rounds, so a line
    /// is never re-matched. O(capacity^2) per round, independent of input
    /// size.
    fn match_round(&mut self) {
        for i in 0..self.left.len() {
            if self.left.is_matched(i) {
                continue;
            }
            let partner = self.right.find_unmatched(self.left.text(i));
            if let Some(j) = partner {
                self.left.mark_matched(i);
                self.right.mark_matched(j);
            }
        }
    }

    /// Run one comparison round, queueing the events it produces.
    fn advance(&mut self) {
        self.rounds += 1;
        self.match_round();

        let mut left_done = 0;
        let mut right_done = 0;

        // The unmatched prefix of the left window leaves as removals.
        while let Some(line) = self.left.get(left_done) {
            if line.matched {
                break;
            }
            self.pending.push_back(DiffEvent::Removed(line.text.clone()));
            left_done += 1;
        }

        // Symmetrically for the right window.
        while let Some(line) = self.right.get(right_done) {
            if line.matched {
                break;
            }
            self.pending.push_back(DiffEvent::Added(line.text.clone()));
            right_done += 1;
        }

        // At most one aligned pair per round. A matched line whose partner
        // is not at the opposite front stays buffered; alignment resolves on
        // a later round.
        if let (Some(left_line), Some(right_line)) =
            (self.left.get(left_done), self.right.get(right_done))
        {
            if left_line.matched && right_line.matched && left_line.text == right_line.text {
                self.pending
                    .push_back(DiffEvent::Unchanged(left_line.text.clone()));
                left_done += 1;
                right_done += 1;
            }
        }

        // Stall-breaker: no motif recurred within the lookahead, or a
        // matched pair lost its partner to an earlier eviction. Force one
        // line out of each side so every round makes progress.
        if left_done == 0 && right_done == 0 {
            if let Some(line) = self.left.front() {
                self.pending.push_back(DiffEvent::Removed(line.text.clone()));
                left_done = 1;
            }
            if let Some(line) = self.right.front() {
                self.pending.push_back(DiffEvent::Added(line.text.clone()));
                right_done = 1;
            }
        }

        self.left.evict(left_done);
        self.right.evict(right_done);
        self.left.refill(&mut self.left_source);
        self.right.refill(&mut self.right_source);
    }
}

impl<L: LineSource, R: LineSource> Iterator for WindowedLineMatcher<L, R> {
    type Item = DiffEvent;

    fn next(&mut self) -> Option<DiffEvent> {
        if !self.primed {
            self.primed = true;
            self.left.refill(&mut self.left_source);
            self.right.refill(&mut self.right_source);
        }

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.left.is_empty() && self.right.is_empty() {
                return None;
            }
            self.advance();
        }
    }
}

/// Compare two in-memory texts line by line.
///
/// Convenience wrapper over [`WindowedLineMatcher`] with the default window
/// capacity, for callers that already hold both texts.
pub fn diff_lines(left: &str, right: &str) -> Vec<DiffEvent> {
    WindowedLineMatcher::new(MemorySource::from_text(left), MemorySource::from_text(right))
        .collect()
}
