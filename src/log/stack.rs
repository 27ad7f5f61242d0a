//! Strict-nesting span stack.
//!
//! # Responsibilities
//! - Enforce LIFO open/close discipline for spans
//! - Assign depth from the current open count
//! - Assign per-depth sibling sequence numbers
//!
//! Not safe for concurrent mutation: one logical request owns one stack.

use crate::log::span::Span;

/// A span that has been opened but not yet closed.
#[derive(Debug)]
struct OpenSpan {
    name: String,
    start: u64,
    depth: u32,
    sequence: u64,
}

/// Per-request stack of currently open spans, innermost last.
#[derive(Debug, Default)]
pub struct SpanStack {
    open: Vec<OpenSpan>,
    // Next sibling sequence per depth level; never reset within a request,
    // so sequences are strictly increasing per depth in emission order.
    next_sequence: Vec<u64>,
}

impl SpanStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open spans.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Names of the currently open spans, outermost first.
    pub fn open_names(&self) -> Vec<String> {
        self.open.iter().map(|s| s.name.clone()).collect()
    }

    /// Push a new span starting at `now`.
    pub fn open(&mut self, name: &str, now: u64) {
        let depth = self.open.len() as u32;
        if self.next_sequence.len() <= depth as usize {
            self.next_sequence.push(0);
        }
        let sequence = self.next_sequence[depth as usize];
        self.next_sequence[depth as usize] += 1;

        self.open.push(OpenSpan {
            name: name.to_string(),
            start: now,
            depth,
            sequence,
        });
    }

    /// Pop the innermost open span, closing it at `now`.
    ///
    /// Returns `None` if no span is open.
    pub fn close(&mut self, now: u64) -> Option<Span> {
        self.open.pop().map(|open| Span {
            name: open.name,
            depth: open.depth,
            sequence: open.sequence,
            start: open.start,
            // Monotonic clock, but guard the invariant anyway.
            end: now.max(open.start),
        })
    }

    /// Force-close every remaining open span at `now`, innermost first.
    ///
    /// Only reached when a request finalizes with spans still open, which is
    /// an internal-consistency failure surfaced by the caller.
    pub fn drain_open(&mut self, now: u64) -> Vec<Span> {
        let mut closed = Vec::with_capacity(self.open.len());
        while let Some(span) = self.close(now) {
            closed.push(span);
        }
        closed
    }
}
