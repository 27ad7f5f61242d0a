//! Sink subsystem: the write path from finished request logs to the
//! external analytics collector.
//!
//! # Data Flow
//! ```text
//! RequestLog::finalize()
//!     → Sink::send(batch)          (fire-and-forget, returns promptly)
//!     → bounded queue              (full queue drops the batch, counted)
//!     → worker task                (serializes, one datagram per batch)
//!     → external collector         (UDP, bounded send timeout)
//! ```
//!
//! # Design Decisions
//! - One shared sink per process, many request logs fan in
//! - Delivery is lossy by contract: a request must never fail or stall
//!   because instrumentation could not be delivered
//! - Drops are counted and logged, never raised to the request path

pub mod collector;
pub mod memory;

pub use collector::{CollectorSink, SinkError};
pub use memory::MemorySink;

use crate::log::span::RecordBatch;

/// The write path accepting finished record batches.
///
/// `send` must return promptly and must not raise into the caller; on any
/// failure the batch is dropped and counted. Safe for concurrent calls from
/// many requests at once.
pub trait Sink: Send + Sync + 'static {
    fn send(&self, batch: RecordBatch);
}
