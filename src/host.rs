//! Host message boundary — the embedding surface of the widget.
//!
//! Messages from the embedding host arrive as JSON documents carrying an
//! `action` (the bus topic) and an optional `data` payload. [`host_pair`]
//! creates the queue between a host transport and the relay; the sender
//! half is the library's embedding API. [`StdinChannel`] is the
//! standalone transport: one JSON document per line on stdin.

use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::runtime::{Component, ComponentFuture};

/// An inbound message from the embedding host.
#[derive(Debug, Clone, Deserialize)]
pub struct HostMessage {
    /// Bus topic this message is published under.
    pub action: String,
    /// Payload; absent on the wire becomes an empty object.
    #[serde(default = "empty_object")]
    pub data: Value,
}

pub(crate) fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Create the host → relay queue.
pub fn host_pair(buffer: usize) -> (mpsc::Sender<HostMessage>, mpsc::Receiver<HostMessage>) {
    mpsc::channel(buffer)
}

// ── StdinChannel ─────────────────────────────────────────────────────────────

/// Reads host messages as JSON lines from stdin and forwards them to the
/// relay. Malformed lines are logged and skipped; EOF ends the channel.
pub struct StdinChannel {
    channel_id: String,
    tx: mpsc::Sender<HostMessage>,
}

impl StdinChannel {
    pub fn new(channel_id: impl Into<String>, tx: mpsc::Sender<HostMessage>) -> Self {
        Self {
            channel_id: channel_id.into(),
            tx,
        }
    }
}

impl Component for StdinChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_stdin(self.channel_id, self.tx, shutdown))
    }
}

async fn run_stdin(
    channel_id: String,
    tx: mpsc::Sender<HostMessage>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    info!(%channel_id, "stdin host channel started");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                info!(%channel_id, "stdin channel shutting down");
                break;
            }

            line = lines.next_line() => {
                match line {
                    Err(e) => {
                        warn!(%channel_id, "stdin read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!(%channel_id, "stdin closed");
                        break;
                    }
                    Ok(Some(raw)) => {
                        let raw = raw.trim();
                        if raw.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<HostMessage>(raw) {
                            Err(e) => warn!(%channel_id, "malformed host message skipped: {e}"),
                            Ok(msg) => {
                                debug!(%channel_id, action = %msg.action, "host message received");
                                if tx.send(msg).await.is_err() {
                                    warn!(%channel_id, "relay gone, stdin channel exiting");
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_with_data_deserializes() {
        let msg: HostMessage = serde_json::from_str(r#"{"action":"ping","data":{"x":1}}"#).unwrap();
        assert_eq!(msg.action, "ping");
        assert_eq!(msg.data, json!({"x": 1}));
    }

    #[test]
    fn missing_data_defaults_to_empty_object() {
        let msg: HostMessage = serde_json::from_str(r#"{"action":"ping"}"#).unwrap();
        assert_eq!(msg.data, json!({}));
    }

    #[test]
    fn missing_action_is_rejected() {
        assert!(serde_json::from_str::<HostMessage>(r#"{"data":{}}"#).is_err());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let msg: HostMessage =
            serde_json::from_str(r#"{"action":"ping","data":{},"origin":"host"}"#).unwrap();
        assert_eq!(msg.action, "ping");
    }
}
