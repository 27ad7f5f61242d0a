//! Request-scoped span recording subsystem.
//!
//! # Data Flow
//! ```text
//! request enters scope
//!     → sampling decides: RequestLog or NullLog (one AnalyticsLog handle)
//!     → measure()/start_span() push onto the span stack (clock.rs stamps)
//!     → guard drop pops the stack, appending a closed span record
//!     → message() appends timestamped message records
//!     → finalize() flushes the ordered records to the shared sink
//! ```
//!
//! # Design Decisions
//! - One log per request; sub-tasks fanning out need their own log
//! - Span close rides an RAII guard, so errors, panics, and cancellation
//!   all close the span exactly once
//! - After finalize every call is a silent no-op

pub mod clock;
pub mod null;
pub mod request_log;
pub mod span;
pub mod stack;

pub use clock::Clock;
pub use null::{AnalyticsLog, NullLog};
pub use request_log::{RequestLog, SpanGuard};
pub use span::{Record, RecordBatch, Span};
pub use stack::SpanStack;
