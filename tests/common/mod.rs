//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_log=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Start a collector stand-in: binds a UDP socket and forwards every
/// datagram, parsed as JSON, to the returned channel.
pub async fn start_udp_collector(addr: SocketAddr) -> mpsc::UnboundedReceiver<serde_json::Value> {
    let socket = UdpSocket::bind(addr).await.unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 64 * 1024];
        loop {
            match socket.recv(&mut buf).await {
                Ok(n) => {
                    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&buf[..n]) {
                        if tx.send(value).is_err() {
                            break;
                        }
                    }
                }
                Err(_) => break,
            }
        }
    });

    rx
}

/// Receive one collector payload or panic after `timeout`.
#[allow(dead_code)]
pub async fn recv_batch(
    rx: &mut mpsc::UnboundedReceiver<serde_json::Value>,
    timeout: Duration,
) -> serde_json::Value {
    tokio::time::timeout(timeout, rx.recv())
        .await
        .expect("no batch arrived at the collector in time")
        .expect("collector channel closed")
}
