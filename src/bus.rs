//! Internal event bus — topic-keyed broadcast channels.
//!
//! The relay publishes each host message under the topic named by its
//! `action`; widget components subscribe to the topics they care about.
//! Publishing is synchronous and fire-and-forget: a topic with no
//! subscribers drops the payload, nothing is buffered for late joiners.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_TOPIC_CAPACITY: usize = 64;

pub struct EventBus {
    capacity: usize,
    topics: RwLock<HashMap<String, broadcast::Sender<Value>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "topic capacity must be greater than 0");
        Self {
            capacity,
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to `topic`, creating its channel on first use.
    ///
    /// Only messages published after this call are delivered.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Value> {
        {
            let topics = self.topics.read().expect("event bus lock poisoned");
            if let Some(sender) = topics.get(topic) {
                return sender.subscribe();
            }
        }

        let mut topics = self.topics.write().expect("event bus lock poisoned");
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Publish `payload` on `topic`.
    ///
    /// Returns the number of subscribers reached; 0 when the topic has
    /// none (the payload is dropped, not an error).
    pub fn publish(&self, topic: &str, payload: Value) -> usize {
        let topics = self.topics.read().expect("event bus lock poisoned");
        match topics.get(topic) {
            Some(sender) => sender.send(payload).unwrap_or(0),
            None => {
                debug!(%topic, "publish on topic with no subscribers");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe("deposit");

        assert_eq!(bus.publish("deposit", json!({"amount": 50})), 1);
        assert_eq!(rx.recv().await.unwrap(), json!({"amount": 50}));
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let bus = EventBus::default();
        let mut deposit_rx = bus.subscribe("deposit");
        let mut withdraw_rx = bus.subscribe("withdraw");

        bus.publish("deposit", json!(1));

        assert_eq!(deposit_rx.recv().await.unwrap(), json!(1));
        assert!(matches!(
            withdraw_rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::default();
        assert_eq!(bus.publish("nobody-home", json!(1)), 0);

        // Subscribing after the fact sees nothing.
        let mut rx = bus.subscribe("nobody-home");
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let bus = EventBus::default();
        let mut a = bus.subscribe("ping");
        let mut b = bus.subscribe("ping");

        assert_eq!(bus.publish("ping", json!({})), 2);
        assert_eq!(a.recv().await.unwrap(), json!({}));
        assert_eq!(b.recv().await.unwrap(), json!({}));
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_panics() {
        let _ = EventBus::new(0);
    }
}
