//! Sampling subsystem: decides which requests get a recording log.

pub mod selector;

pub use selector::LogSelector;
