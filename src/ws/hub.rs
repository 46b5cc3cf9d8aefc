//! Broadcast Hub
//!
//! Keeps the set of currently connected viewer channels and fans each
//! published snapshot out to all of them. Delivery is per-subscriber
//! independent: a subscriber whose channel is gone is evicted during the
//! publish and never affects the others or the ingest caller.

use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::FeedMessage;
use crate::store::Measurement;

/// Unique identifier for a subscriber channel
pub type SubscriberId = String;

/// Configuration for the broadcast hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent subscribers
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

/// Manages all live viewer channels and snapshot fan-out.
pub struct BroadcastHub {
    /// Active subscribers: SubscriberId → channel sender
    subscribers: RwLock<HashMap<SubscriberId, mpsc::UnboundedSender<FeedMessage>>>,
    config: HubConfig,
}

impl BroadcastHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new subscriber channel.
    ///
    /// Returns the subscriber ID on success, or an error if the connection
    /// limit has been reached. A fresh subscriber receives nothing until
    /// the next write triggers a publish; there is no catch-up push.
    pub async fn subscribe(
        &self,
        sender: mpsc::UnboundedSender<FeedMessage>,
    ) -> Result<SubscriberId, HubError> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        subscribers.insert(id.clone(), sender);

        tracing::info!(subscriber_id = %id, "Viewer connected");
        Ok(id)
    }

    /// Remove a subscriber channel. Idempotent: removing an id that is
    /// already gone is a no-op.
    pub async fn unsubscribe(&self, id: &str) {
        if self.subscribers.write().await.remove(id).is_some() {
            tracing::info!(subscriber_id = %id, "Viewer disconnected");
        }
    }

    /// Send the snapshot to every currently registered subscriber.
    ///
    /// The snapshot is encoded once; each subscriber gets a clone. A send
    /// failure means the receiving session is gone, so that subscriber is
    /// evicted here rather than retried. Returns the number of successful
    /// deliveries.
    pub async fn publish(&self, snapshot: &[Measurement]) -> usize {
        let message = match FeedMessage::from_snapshot(snapshot) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode snapshot");
                return 0;
            }
        };

        let mut dead = Vec::new();
        let mut delivered = 0;

        {
            let subscribers = self.subscribers.read().await;
            for (id, sender) in subscribers.iter() {
                if sender.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    dead.push(id.clone());
                }
            }
        }

        if !dead.is_empty() {
            let mut subscribers = self.subscribers.write().await;
            for id in &dead {
                subscribers.remove(id);
                tracing::debug!(subscriber_id = %id, "Evicted dead subscriber");
            }
        }

        tracing::trace!(
            delivered,
            evicted = dead.len(),
            history_len = snapshot.len(),
            "Snapshot published"
        );

        delivered
    }

    /// Current number of registered subscribers.
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

/// Errors that can occur in the broadcast hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections (limit: {0})")]
    TooManyConnections(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64) -> Measurement {
        Measurement::new(time, 1.0, 2.0, 3.0)
    }

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_connections, 1000);
    }

    #[tokio::test]
    async fn test_subscribe_unsubscribe() {
        let hub = BroadcastHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.subscribe(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.subscriber_count().await, 1);

        hub.unsubscribe(&id).await;
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let hub = BroadcastHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.subscribe(tx).await.unwrap();
        hub.unsubscribe(&id).await;
        hub.unsubscribe(&id).await;
        hub.unsubscribe("never-existed").await;

        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = BroadcastHub::new(HubConfig { max_connections: 2 });

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        hub.subscribe(tx1).await.unwrap();
        hub.subscribe(tx2).await.unwrap();
        let result = hub.subscribe(tx3).await;

        assert!(matches!(
            result,
            Err(HubError::TooManyConnections(2))
        ));
    }

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers_identically() {
        let hub = BroadcastHub::new(HubConfig::default());

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.subscribe(tx_a).await.unwrap();
        hub.subscribe(tx_b).await.unwrap();

        let snapshot = vec![sample(0.2), sample(0.1)];
        let delivered = hub.publish(&snapshot).await;
        assert_eq!(delivered, 2);

        let msg_a = rx_a.try_recv().unwrap();
        let msg_b = rx_b.try_recv().unwrap();
        assert_eq!(msg_a.result, msg_b.result);

        let decoded: Vec<[f64; 4]> = serde_json::from_str(&msg_a.result).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0][0], 0.2);
    }

    #[tokio::test]
    async fn test_unsubscribed_receives_nothing_further() {
        let hub = BroadcastHub::new(HubConfig::default());

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.subscribe(tx_a).await.unwrap();
        let id_b = hub.subscribe(tx_b).await.unwrap();

        hub.publish(&[sample(0.1)]).await;
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());

        hub.unsubscribe(&id_b).await;

        hub.publish(&[sample(0.2), sample(0.1)]).await;
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dead_subscriber_is_evicted() {
        let hub = BroadcastHub::new(HubConfig::default());

        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        hub.subscribe(tx_live).await.unwrap();
        hub.subscribe(tx_dead).await.unwrap();
        assert_eq!(hub.subscriber_count().await, 2);

        // Dropping the receiver simulates a viewer that went away
        drop(rx_dead);

        let delivered = hub.publish(&[sample(0.1)]).await;
        assert_eq!(delivered, 1);
        assert!(rx_live.try_recv().is_ok());
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers() {
        let hub = BroadcastHub::new(HubConfig::default());
        assert_eq!(hub.publish(&[sample(0.1)]).await, 0);
    }
}
