//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the analytics log.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Per-request sampling settings.
    pub sampling: SamplingConfig,

    /// Collector sink settings.
    pub collector: CollectorConfig,
}

/// Controls which requests get a recording log.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Master switch; when false every request gets the disabled log.
    pub enabled: bool,

    /// Fraction of requests to record, in [0.0, 1.0].
    pub sample_rate: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_rate: 1.0,
        }
    }
}

/// Collector sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Collector address (e.g., "127.0.0.1:9510").
    pub address: String,

    /// Bounded queue depth between request logs and the sink worker.
    pub queue_capacity: usize,

    /// Per-batch send timeout in milliseconds.
    pub send_timeout_ms: u64,

    /// Maximum serialized batch size; larger batches are dropped.
    pub max_datagram_bytes: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:9510".to_string(),
            queue_capacity: 1024,
            send_timeout_ms: 200,
            max_datagram_bytes: 60 * 1024,
        }
    }
}
