//! Disabled-path logger and the uniform handle call sites receive.

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use crate::log::request_log::{RequestLog, SpanGuard};

/// Zero-cost stand-in used when analytics is disabled for a request.
///
/// Same contract as [`RequestLog`]: `measure` runs the body and returns its
/// result untouched, with no span bookkeeping; `message` and `finalize` do
/// nothing. Instrumented code behaves identically either way, so enablement
/// bugs cannot hide on the disabled path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl NullLog {
    pub fn measure<T>(&self, _name: &str, body: impl FnOnce() -> T) -> T {
        body()
    }

    pub async fn measure_async<T>(&self, _name: &str, fut: impl Future<Output = T>) -> T {
        fut.await
    }

    pub fn message(&self, _text: impl Into<String>) {}

    pub fn finalize(&self) {}
}

/// The handle injected into request context: a recording log or a null log
/// behind one interface, so call sites never branch on enablement.
///
/// Cheap to clone; clones share the same underlying recorder.
#[derive(Debug, Clone, Default)]
pub enum AnalyticsLog {
    Recording(Arc<RequestLog>),
    #[default]
    Disabled,
}

impl AnalyticsLog {
    /// Wrap a recording log.
    pub fn recording(log: RequestLog) -> Self {
        Self::Recording(Arc::new(log))
    }

    /// The disabled handle. Also the `Default`, so a missed context lookup
    /// degrades to no-op instrumentation instead of failing the request.
    pub fn disabled() -> Self {
        Self::Disabled
    }

    /// Whether records are actually being kept.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Recording(_))
    }

    /// The owning request id, if recording.
    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Recording(log) => Some(log.request_id()),
            Self::Disabled => None,
        }
    }

    /// Run `body` inside a named span; see [`RequestLog::measure`].
    pub fn measure<T>(&self, name: &str, body: impl FnOnce() -> T) -> T {
        match self {
            Self::Recording(log) => log.measure(name, body),
            Self::Disabled => body(),
        }
    }

    /// Run a future inside a named span; see [`RequestLog::measure_async`].
    pub async fn measure_async<T>(&self, name: &str, fut: impl Future<Output = T>) -> T {
        match self {
            Self::Recording(log) => log.measure_async(name, fut).await,
            Self::Disabled => fut.await,
        }
    }

    /// Open a span that closes when the guard drops.
    pub fn start_span(&self, name: &str) -> SpanGuard<'_> {
        match self {
            Self::Recording(log) => log.start_span(name),
            Self::Disabled => SpanGuard::noop(),
        }
    }

    /// Append a timestamped message.
    pub fn message(&self, text: impl Into<String>) {
        if let Self::Recording(log) = self {
            log.message(text);
        }
    }

    /// Flush to the sink; no-op when disabled, idempotent when recording.
    pub fn finalize(&self) {
        if let Self::Recording(log) = self {
            log.finalize();
        }
    }
}
