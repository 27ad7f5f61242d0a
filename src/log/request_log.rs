//! Per-request analytics recorder.
//!
//! # Responsibilities
//! - Record named, timed spans with exact nesting depth
//! - Record timestamped free-form messages
//! - Flush the ordered records to the sink exactly once at finalize
//!
//! # Design Decisions
//! - Span close is guaranteed by an RAII guard, so every exit path (normal
//!   return, error, panic, task cancellation) closes the span exactly once
//! - The internal mutex is never held while instrumented work runs; one
//!   logical request owns one log, so the lock is uncontended
//! - Calls after finalize are silent no-ops: teardown races with stray late
//!   instrumentation must never fail a request

use std::future::Future;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::log::clock::Clock;
use crate::log::span::{Record, RecordBatch};
use crate::log::stack::SpanStack;
use crate::sink::Sink;

struct Inner {
    stack: SpanStack,
    // Emission-ordered records: messages appended at call time, spans at
    // close time.
    records: Vec<Record>,
    next_message_sequence: u64,
    finalized: bool,
}

/// The per-request recorder.
///
/// Bound to one request for its whole lifetime; never shared across
/// concurrent units of work. Sub-tasks that fan out need their own log.
pub struct RequestLog {
    request_id: Uuid,
    clock: Clock,
    sink: Arc<dyn Sink>,
    inner: Mutex<Inner>,
}

impl RequestLog {
    /// Create a recorder for one request, bound to a shared sink.
    pub fn new(request_id: Uuid, sink: Arc<dyn Sink>) -> Self {
        Self {
            request_id,
            clock: Clock::start(),
            sink,
            inner: Mutex::new(Inner {
                stack: SpanStack::new(),
                records: Vec::new(),
                next_message_sequence: 0,
                finalized: false,
            }),
        }
    }

    /// The owning request identifier.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Run `body` inside a named span.
    ///
    /// The span is closed on every exit path and `body`'s return value,
    /// error, or panic propagates unchanged. After finalize the body still
    /// runs; only the span bookkeeping is skipped.
    pub fn measure<T>(&self, name: &str, body: impl FnOnce() -> T) -> T {
        let _span = self.start_span(name);
        body()
    }

    /// Run a future inside a named span.
    ///
    /// The guard is held across suspension, so the span covers elapsed
    /// monotonic time; cancellation closes the span on the drop path.
    pub async fn measure_async<T>(&self, name: &str, fut: impl Future<Output = T>) -> T {
        let _span = self.start_span(name);
        fut.await
    }

    /// Open a span explicitly; it closes when the returned guard drops.
    ///
    /// The scoped form for async code holding a span across `.await` points.
    pub fn start_span(&self, name: &str) -> SpanGuard<'_> {
        let mut inner = self.inner.lock().expect("analytics log mutex poisoned");
        if inner.finalized {
            return SpanGuard::noop();
        }
        let now = self.clock.elapsed_nanos();
        inner.stack.open(name, now);
        SpanGuard { log: Some(self) }
    }

    /// Append a timestamped message; valid at any nesting depth.
    pub fn message(&self, text: impl Into<String>) {
        let mut inner = self.inner.lock().expect("analytics log mutex poisoned");
        if inner.finalized {
            return;
        }
        let timestamp = self.clock.elapsed_nanos();
        let sequence = inner.next_message_sequence;
        inner.next_message_sequence += 1;
        inner.records.push(Record::Message {
            sequence,
            timestamp,
            text: text.into(),
        });
    }

    /// Flush the ordered records to the sink and seal the log.
    ///
    /// Idempotent. A non-empty span stack here is an internal-consistency
    /// failure: it is surfaced as a message record and the open spans are
    /// force-closed so their timing is flushed rather than lost. The
    /// request's own outcome is never affected.
    pub fn finalize(&self) {
        let batch = {
            let mut inner = self.inner.lock().expect("analytics log mutex poisoned");
            if inner.finalized {
                return;
            }
            inner.finalized = true;

            let now = self.clock.elapsed_nanos();
            if !inner.stack.is_empty() {
                let open = inner.stack.open_names();
                tracing::warn!(
                    request_id = %self.request_id,
                    open_spans = ?open,
                    "span stack not empty at finalize"
                );
                let sequence = inner.next_message_sequence;
                inner.next_message_sequence += 1;
                inner.records.push(Record::Message {
                    sequence,
                    timestamp: now,
                    text: format!(
                        "consistency violation: {} span(s) still open at finalize: {}",
                        open.len(),
                        open.join(", ")
                    ),
                });
                let closed = inner.stack.drain_open(now);
                inner.records.extend(closed.into_iter().map(Record::Span));
            }

            if inner.records.is_empty() {
                return;
            }
            RecordBatch {
                request_id: self.request_id,
                started_at: self.clock.wall_start_millis(),
                records: std::mem::take(&mut inner.records),
            }
        };

        // Send outside the lock; the sink returns promptly and never raises.
        self.sink.send(batch);
    }

    fn close_span(&self) {
        // Runs in Drop, possibly during unwinding: degrade instead of
        // panicking if the lock is poisoned.
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.finalized {
            // Finalize already drained the stack; nothing left to close.
            return;
        }
        let now = self.clock.elapsed_nanos();
        if let Some(span) = inner.stack.close(now) {
            inner.records.push(Record::Span(span));
        }
    }
}

impl std::fmt::Debug for RequestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLog")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// RAII guard closing the innermost open span on drop.
#[must_use = "the span closes when this guard is dropped"]
#[derive(Debug)]
pub struct SpanGuard<'a> {
    log: Option<&'a RequestLog>,
}

impl SpanGuard<'_> {
    /// A guard with nothing to close (disabled log or post-finalize open).
    pub(crate) fn noop() -> Self {
        Self { log: None }
    }
}

impl Drop for SpanGuard<'_> {
    fn drop(&mut self) {
        if let Some(log) = self.log.take() {
            log.close_span();
        }
    }
}
