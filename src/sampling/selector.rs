//! Per-request selection between a recording log and the disabled log.

use std::sync::Arc;

use arc_swap::ArcSwap;
use uuid::Uuid;

use crate::config::SamplingConfig;
use crate::log::{AnalyticsLog, RequestLog};
use crate::sink::Sink;

/// Decides, per request, whether analytics records are kept.
///
/// Holds the shared sink every recording log is bound to. The sampling
/// section is swapped atomically, so the rate can be retuned at runtime
/// without tearing down the pipeline.
pub struct LogSelector {
    sink: Arc<dyn Sink>,
    sampling: ArcSwap<SamplingConfig>,
}

impl LogSelector {
    pub fn new(sink: Arc<dyn Sink>, sampling: SamplingConfig) -> Self {
        Self {
            sink,
            sampling: ArcSwap::from_pointee(sampling),
        }
    }

    /// Select a log for a request with a fresh id.
    pub fn select(&self) -> AnalyticsLog {
        self.select_for(Uuid::new_v4())
    }

    /// Select a log for the given request id.
    ///
    /// Returns the recording form when sampling is enabled and the coin
    /// flip passes, the disabled form otherwise. Callers use the handle
    /// identically either way.
    pub fn select_for(&self, request_id: Uuid) -> AnalyticsLog {
        let sampling = self.sampling.load();
        if !sampling.enabled {
            return AnalyticsLog::disabled();
        }
        let sampled = sampling.sample_rate >= 1.0 || fastrand::f64() < sampling.sample_rate;
        if sampled {
            AnalyticsLog::recording(RequestLog::new(request_id, self.sink.clone()))
        } else {
            AnalyticsLog::disabled()
        }
    }

    /// Replace the sampling settings atomically.
    pub fn update(&self, sampling: SamplingConfig) {
        tracing::info!(
            enabled = sampling.enabled,
            sample_rate = sampling.sample_rate,
            "sampling settings updated"
        );
        self.sampling.store(Arc::new(sampling));
    }

    /// Snapshot of the current sampling settings.
    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig::clone(&self.sampling.load())
    }
}
