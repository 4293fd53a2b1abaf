//! NATS boundary.
//!
//! Chat envelopes arrive as JSON on the inbound subject. Replies produced
//! by the game are drained from the outbound channel and published as JSON
//! on the outbound subject, in the order they were queued.

use socialquest_types::Envelope;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::BotError;

/// NATS client wrapper for the bot.
#[derive(Clone)]
pub struct NatsBridge {
    client: async_nats::Client,
}

impl NatsBridge {
    /// Connect to a NATS server.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, BotError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| BotError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Subscribe to inbound chat envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Nats`] if the subscription fails.
    pub async fn subscribe(&self, subject: &str) -> Result<async_nats::Subscriber, BotError> {
        let subscriber = self
            .client
            .subscribe(subject.to_owned())
            .await
            .map_err(|e| BotError::Nats(format!("failed to subscribe to {subject}: {e}")))?;
        info!(subject = subject, "subscribed to inbound messages");
        Ok(subscriber)
    }

    /// Decode an inbound payload.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Serde`] if the payload is not an envelope.
    pub fn decode_envelope(payload: &[u8]) -> Result<Envelope, BotError> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// Publish one reply envelope.
    ///
    /// # Errors
    ///
    /// Returns [`BotError`] if serialization or publishing fails.
    pub async fn publish_envelope(&self, subject: &str, envelope: &Envelope) -> Result<(), BotError> {
        let payload = serde_json::to_vec(envelope)?;
        self.client
            .publish(subject.to_owned(), payload.into())
            .await
            .map_err(|e| BotError::Nats(format!("failed to publish to {subject}: {e}")))?;
        Ok(())
    }

    /// Publish every reply from `outbound` until the channel closes.
    ///
    /// Publish failures are logged and the reply is dropped.
    pub async fn forward_replies(self, subject: String, mut outbound: mpsc::Receiver<Envelope>) {
        info!(subject = subject, "reply forwarder started");
        while let Some(envelope) = outbound.recv().await {
            match self.publish_envelope(&subject, &envelope).await {
                Ok(()) => debug!(subject = subject, "reply published"),
                Err(e) => warn!(subject = subject, error = %e, "failed to publish reply"),
            }
        }
        info!("outbound channel closed, reply forwarder stopping");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_router_payloads() {
        let payload = r#"{
            "user": {"id": "u1", "name": "Alice"},
            "room": {"id": "lobby", "topic": "general"},
            "message": {"text": "つかれた"},
            "trace": 7
        }"#
        .as_bytes();
        let envelope = NatsBridge::decode_envelope(payload).unwrap();
        let sender = envelope.sender().unwrap();
        assert_eq!(sender.key.room, "lobby");
        assert_eq!(sender.text, "つかれた");
        assert_eq!(envelope.extra.get("trace"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn rejects_garbage() {
        let result = NatsBridge::decode_envelope(b"not json");
        assert!(matches!(result, Err(BotError::Serde(_))));
    }

    #[test]
    fn replies_keep_unknown_fields() {
        let payload = br#"{"user":{"id":"u1","name":"A"},"room":{"id":"r","topic":"t"},"message":{"text":"x"}}"#;
        let envelope = NatsBridge::decode_envelope(payload).unwrap();
        let json = serde_json::to_value(envelope.reply("hi")).unwrap();
        assert_eq!(json["room"]["topic"], "t");
        assert_eq!(json["message"]["text"], "hi");
        assert_eq!(json["mode"], "reply");
    }
}
