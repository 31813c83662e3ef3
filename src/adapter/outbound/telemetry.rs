//! Audit sink that ships events to an HTTP collector.
//!
//! Events are queued on an unbounded channel and POSTed as JSON by a
//! background task, so recording never waits on the network. Queued events
//! are lost if the runtime stops first; call
//! [`TelemetryAuditSink::shutdown`] before exit.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client as HttpClient;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::AuditEvent;
use crate::port::outbound::audit::AuditSink;

pub struct TelemetryAuditSink {
    sender: Mutex<Option<mpsc::UnboundedSender<AuditEvent>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryAuditSink {
    /// Create the sink and spawn its delivery worker.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(endpoint: String, http: HttpClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(telemetry_worker(endpoint, http, receiver));
        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Close the queue and wait up to `grace` for queued events to go out.
    ///
    /// Events recorded afterwards are dropped with a warning. Calling this
    /// more than once is harmless.
    pub async fn shutdown(&self, grace: Duration) {
        drop(self.sender.lock().take());
        let Some(worker) = self.worker.lock().take() else {
            return;
        };

        match tokio::time::timeout(grace, worker).await {
            Ok(Ok(())) => debug!("Telemetry audit queue flushed"),
            Ok(Err(e)) => error!(error = %e, "Telemetry audit worker failed"),
            Err(_) => warn!(
                grace = ?grace,
                "Telemetry audit queue not flushed in time, dropping remaining events"
            ),
        }
    }
}

impl AuditSink for TelemetryAuditSink {
    fn record(&self, event: AuditEvent) {
        let delivered = match self.sender.lock().as_ref() {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        };
        if !delivered {
            warn!("Telemetry audit channel closed");
        }
    }
}

async fn telemetry_worker(
    endpoint: String,
    http: HttpClient,
    mut receiver: mpsc::UnboundedReceiver<AuditEvent>,
) {
    info!(endpoint = %endpoint, "Telemetry audit sink started");

    while let Some(event) = receiver.recv().await {
        let event_type = event.event_type;
        match http.post(&endpoint).json(&event).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(event = %event_type, "Audit event delivered");
            }
            Ok(response) => {
                warn!(
                    event = %event_type,
                    status = response.status().as_u16(),
                    "Telemetry collector rejected audit event"
                );
            }
            Err(e) => {
                error!(event = %event_type, error = %e, "Failed to deliver audit event");
            }
        }
    }

    debug!("Telemetry audit worker shutting down");
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener as StdTcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Collector that answers 204 to every request and counts them.
    fn spawn_collector() -> (String, Arc<AtomicUsize>) {
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = delivered.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let counter = counter.clone();
                std::thread::spawn(move || serve_connection(stream, &counter));
            }
        });
        (format!("http://{addr}/audit"), delivered)
    }

    fn serve_connection(mut stream: TcpStream, delivered: &AtomicUsize) {
        let mut pending = Vec::new();
        let mut buf = [0_u8; 4096];
        loop {
            while let Some(len) = complete_request_len(&pending) {
                pending.drain(..len);
                delivered.fetch_add(1, Ordering::SeqCst);
                if stream
                    .write_all(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n")
                    .is_err()
                {
                    return;
                }
            }
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => pending.extend_from_slice(&buf[..n]),
            }
        }
    }

    fn complete_request_len(raw: &[u8]) -> Option<usize> {
        let end = raw.windows(4).position(|w| w == b"\r\n\r\n")?;
        let head = String::from_utf8_lossy(&raw[..end]);
        let body_len = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        let total = end + 4 + body_len;
        (raw.len() >= total).then_some(total)
    }

    #[tokio::test]
    async fn posts_events_as_json() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = TelemetryAuditSink::new(format!("http://{addr}/audit"), HttpClient::new());
        sink.record(AuditEvent::logout(Some("u-7")));

        let (mut socket, _) = tokio::time::timeout(Duration::from_secs(5), listener.accept())
            .await
            .unwrap()
            .unwrap();

        let mut received = Vec::new();
        let mut buf = [0_u8; 1024];
        while !String::from_utf8_lossy(&received).contains("\"userId\":\"u-7\"") {
            let n = socket.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before body arrived");
            received.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();

        let request = String::from_utf8_lossy(&received);
        assert!(request.starts_with("POST /audit "));
        assert!(request.contains("\"eventType\":\"USER_LOGOUT\""));
    }

    #[test]
    fn shutdown_flushes_queue_before_runtime_drops() {
        let (endpoint, delivered) = spawn_collector();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let sink = TelemetryAuditSink::new(endpoint, HttpClient::new());
            sink.record(AuditEvent::logout(Some("u-1")));
            sink.record(AuditEvent::logout(Some("u-2")));
            sink.shutdown(Duration::from_secs(5)).await;
        });
        drop(runtime);

        assert_eq!(delivered.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn shutdown_gives_up_after_grace() {
        // The kernel completes the handshake but nobody ever answers.
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let sink = TelemetryAuditSink::new(format!("http://{addr}/audit"), HttpClient::new());
        sink.record(AuditEvent::logout(None));

        let started = std::time::Instant::now();
        sink.shutdown(Duration::from_millis(100)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[tokio::test]
    async fn record_after_shutdown_is_dropped_quietly() {
        let sink = TelemetryAuditSink::new("http://127.0.0.1:9/audit".into(), HttpClient::new());
        sink.shutdown(Duration::from_secs(1)).await;

        sink.record(AuditEvent::logout(Some("u-1")));
        sink.record(AuditEvent::logout(None));
        sink.shutdown(Duration::from_secs(1)).await;
    }
}
