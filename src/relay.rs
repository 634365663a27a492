//! Host relay — forwards each host message onto the event bus.
//!
//! One inbound message produces exactly one publish on the topic named
//! by its `action`. No validation, no acknowledgement, no backpressure:
//! delivery is fire-and-forget, and a topic with no subscribers simply
//! drops the payload.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::bus::EventBus;
use crate::error::AppError;
use crate::host::{HostMessage, empty_object};
use crate::runtime::{Component, ComponentFuture};

/// Publish one host message on the bus. Returns the subscriber count.
///
/// A `null` payload is normalized to an empty object so subscribers can
/// always index into it.
pub fn relay_message(bus: &EventBus, msg: HostMessage) -> usize {
    let HostMessage { action, data } = msg;
    let payload = match data {
        Value::Null => empty_object(),
        data => data,
    };
    bus.publish(&action, payload)
}

/// The relay run loop as a [`Component`]: drains the host queue until
/// shutdown or until every host sender is gone.
pub struct RelayComponent {
    rx: mpsc::Receiver<HostMessage>,
    bus: Arc<EventBus>,
}

impl RelayComponent {
    pub fn new(rx: mpsc::Receiver<HostMessage>, bus: Arc<EventBus>) -> Self {
        Self { rx, bus }
    }
}

impl Component for RelayComponent {
    fn id(&self) -> &str {
        "relay"
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_relay(self.rx, self.bus, shutdown))
    }
}

async fn run_relay(
    mut rx: mpsc::Receiver<HostMessage>,
    bus: Arc<EventBus>,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    info!("host relay started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                info!("relay shutting down");
                break;
            }

            msg = rx.recv() => {
                match msg {
                    None => {
                        info!("host queue closed, relay exiting");
                        break;
                    }
                    Some(msg) => {
                        let topic = msg.action.clone();
                        let delivered = relay_message(&bus, msg);
                        debug!(%topic, delivered, "host message relayed");
                    }
                }
            }
        }
    }

    Ok(())
}
