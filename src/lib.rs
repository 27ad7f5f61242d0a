//! Per-request hierarchical analytics logging.
//!
//! A request-scoped recorder for web services: named, timed spans that nest
//! arbitrarily, timestamped messages, and a lossy fan-in sink that forwards
//! finished batches to an external analytics collector.
//!
//! # Architecture Overview
//!
//! ```text
//!   request ──▶ http::middleware ──▶ sampling::LogSelector
//!                     │                      │
//!                     │            RequestLog or NullLog
//!                     ▼                      │
//!              handlers measure() ◀──────────┘
//!              stages & messages
//!                     │
//!                finalize()
//!                     ▼
//!               sink::CollectorSink ──▶ analytics collector (UDP)
//! ```
//!
//! Span close is guaranteed on every exit path (return, error, panic, task
//! cancellation) by RAII guards, and the disabled path implements the same
//! contract at zero cost, so instrumentation never changes the behavior of
//! the code it wraps.

// Core recording
pub mod log;
pub mod sink;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod sampling;

pub use config::{AnalyticsConfig, CollectorConfig, SamplingConfig};
pub use http::analytics_middleware;
pub use log::{AnalyticsLog, NullLog, Record, RecordBatch, RequestLog, Span, SpanGuard};
pub use sampling::LogSelector;
pub use sink::{CollectorSink, MemorySink, Sink};
