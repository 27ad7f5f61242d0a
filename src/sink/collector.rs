//! UDP sink forwarding record batches to the analytics collector.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::config::CollectorConfig;
use crate::log::span::RecordBatch;
use crate::sink::Sink;

/// Errors that can occur while setting up the collector sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Binding or connecting the transport socket failed.
    #[error("collector socket error: {0}")]
    Socket(#[from] std::io::Error),
}

/// Production sink: bounded queue in front of a background worker that
/// serializes each batch as one JSON datagram and sends it to the collector.
///
/// `send` never blocks and never raises; a full or closed queue drops the
/// batch and increments the drop counter. Shared across all request logs on
/// a process (fan-in); the queue is the serialization point.
pub struct CollectorSink {
    tx: mpsc::Sender<RecordBatch>,
    dropped: Arc<AtomicU64>,
}

impl CollectorSink {
    /// Bind a local UDP socket, connect it to the collector address, and
    /// spawn the worker task. The worker exits when the sink is dropped.
    pub async fn connect(config: &CollectorConfig) -> Result<Self, SinkError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(&config.address).await?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let dropped = Arc::new(AtomicU64::new(0));

        tokio::spawn(worker(
            socket,
            rx,
            Duration::from_millis(config.send_timeout_ms),
            config.max_datagram_bytes,
            dropped.clone(),
        ));

        tracing::info!(collector = %config.address, "collector sink connected");
        Ok(Self { tx, dropped })
    }

    /// Total batches dropped so far (queue full, serialization failure,
    /// oversized datagram, transport error, or send timeout).
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Sink for CollectorSink {
    fn send(&self, batch: RecordBatch) {
        match self.tx.try_send(batch) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(batch))
            | Err(mpsc::error::TrySendError::Closed(batch)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("analytics_batches_dropped_total", "reason" => "queue")
                    .increment(1);
                tracing::debug!(
                    request_id = %batch.request_id,
                    records = batch.records.len(),
                    "collector queue unavailable, batch dropped"
                );
            }
        }
    }
}

async fn worker(
    socket: UdpSocket,
    mut rx: mpsc::Receiver<RecordBatch>,
    send_timeout: Duration,
    max_datagram_bytes: usize,
    dropped: Arc<AtomicU64>,
) {
    while let Some(batch) = rx.recv().await {
        let request_id = batch.request_id;

        let payload = match serde_json::to_vec(&batch) {
            Ok(payload) => payload,
            Err(e) => {
                dropped.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("analytics_batches_dropped_total", "reason" => "serialize")
                    .increment(1);
                tracing::warn!(request_id = %request_id, error = %e, "batch serialization failed");
                continue;
            }
        };

        if payload.len() > max_datagram_bytes {
            dropped.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("analytics_batches_dropped_total", "reason" => "oversized")
                .increment(1);
            tracing::warn!(
                request_id = %request_id,
                bytes = payload.len(),
                limit = max_datagram_bytes,
                "batch exceeds datagram limit, dropped"
            );
            continue;
        }

        match tokio::time::timeout(send_timeout, socket.send(&payload)).await {
            Ok(Ok(_)) => {
                metrics::counter!("analytics_batches_sent_total").increment(1);
                tracing::trace!(request_id = %request_id, bytes = payload.len(), "batch sent");
            }
            Ok(Err(e)) => {
                dropped.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("analytics_batches_dropped_total", "reason" => "transport")
                    .increment(1);
                tracing::warn!(request_id = %request_id, error = %e, "collector send failed");
            }
            Err(_) => {
                dropped.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("analytics_batches_dropped_total", "reason" => "timeout")
                    .increment(1);
                tracing::warn!(
                    request_id = %request_id,
                    timeout_ms = send_timeout.as_millis() as u64,
                    "collector send timed out"
                );
            }
        }
    }

    tracing::debug!("collector sink worker stopped");
}
