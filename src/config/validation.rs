//! Configuration validation.
//!
//! Serde handles syntactic checks; this module covers semantics: value
//! ranges and addresses that must parse. All errors are returned at once,
//! not just the first, so a bad config can be fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AnalyticsConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Sample rate must be a fraction.
    #[error("sampling.sample_rate {0} is outside [0.0, 1.0]")]
    SampleRateOutOfRange(f64),

    /// Collector address must be a socket address.
    #[error("collector.address {0:?} is not a valid socket address")]
    InvalidCollectorAddress(String),

    /// Queue capacity of zero would drop every batch.
    #[error("collector.queue_capacity must be greater than zero")]
    ZeroQueueCapacity,

    /// A zero timeout would drop every send.
    #[error("collector.send_timeout_ms must be greater than zero")]
    ZeroSendTimeout,

    /// Datagram limit too small to carry any batch.
    #[error("collector.max_datagram_bytes {0} is too small (minimum 512)")]
    DatagramLimitTooSmall(usize),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &AnalyticsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let rate = config.sampling.sample_rate;
    if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
        errors.push(ValidationError::SampleRateOutOfRange(rate));
    }

    if config.collector.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidCollectorAddress(
            config.collector.address.clone(),
        ));
    }

    if config.collector.queue_capacity == 0 {
        errors.push(ValidationError::ZeroQueueCapacity);
    }

    if config.collector.send_timeout_ms == 0 {
        errors.push(ValidationError::ZeroSendTimeout);
    }

    if config.collector.max_datagram_bytes < 512 {
        errors.push(ValidationError::DatagramLimitTooSmall(
            config.collector.max_datagram_bytes,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
