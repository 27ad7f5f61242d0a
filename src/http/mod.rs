//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → middleware.rs (resolve request id, select log, inject extension)
//!     → downstream handlers measure their own stages
//!     → response produced
//!     → middleware finalizes the log → sink → collector
//! ```

pub mod middleware;

pub use middleware::{analytics_middleware, REQUEST_SPAN, X_REQUEST_ID};
