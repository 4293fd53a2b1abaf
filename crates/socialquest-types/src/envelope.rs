//! Chat message envelope exchanged with the message router.
//!
//! The router delivers JSON objects shaped like:
//!
//! ```json
//! {
//!   "user": { "id": "u1", "name": "Alice" },
//!   "room": { "id": "lobby" },
//!   "message": { "text": "つかれた" },
//!   "mode": null
//! }
//! ```
//!
//! Every field is optional on the wire. Unknown fields are preserved in the
//! `extra` maps so that a reply carries everything the router attached to
//! the original message. Required fields are checked once, at the boundary,
//! by [`Envelope::sender`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::EntityKey;

/// Value written to [`Envelope::mode`] on outbound replies.
pub const REPLY_MODE: &str = "reply";

/// Errors raised when an inbound envelope lacks a required field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// A required field was absent or null.
    #[error("envelope is missing required field `{0}`")]
    MissingField(&'static str),
}

/// The author of a chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Router-assigned user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name used in replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields the router attached that the game does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The room a message was posted in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Router-assigned room identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fields the router attached that the game does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Message payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields the router attached that the game does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chat message as seen by the router.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Room the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    /// Message payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageBody>,
    /// Delivery mode understood by the router (e.g. [`REPLY_MODE`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Top-level fields the game does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validated view of the fields the game reads from an inbound envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Entity the message belongs to.
    pub key: EntityKey,
    /// Display name of the author.
    pub name: String,
    /// Message text.
    pub text: String,
}

impl Envelope {
    /// Build a minimal envelope, mostly useful for tests and tooling.
    pub fn new(room: &str, user_id: &str, user_name: &str, text: &str) -> Self {
        Self {
            user: Some(User {
                id: Some(user_id.to_owned()),
                name: Some(user_name.to_owned()),
                extra: Map::new(),
            }),
            room: Some(Room {
                id: Some(room.to_owned()),
                extra: Map::new(),
            }),
            message: Some(MessageBody {
                text: Some(text.to_owned()),
                extra: Map::new(),
            }),
            mode: None,
            extra: Map::new(),
        }
    }

    /// Message text, if present.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }

    /// Extract and validate the author, room, and text.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::MissingField`] naming the first absent field.
    pub fn sender(&self) -> Result<Sender, EnvelopeError> {
        let user = self.user.as_ref().ok_or(EnvelopeError::MissingField("user"))?;
        let user_id = user.id.as_ref().ok_or(EnvelopeError::MissingField("user.id"))?;
        let name = user
            .name
            .as_ref()
            .ok_or(EnvelopeError::MissingField("user.name"))?;
        let room_id = self
            .room
            .as_ref()
            .and_then(|r| r.id.as_ref())
            .ok_or(EnvelopeError::MissingField("room.id"))?;
        let text = self.text().ok_or(EnvelopeError::MissingField("message.text"))?;

        Ok(Sender {
            key: EntityKey::new(room_id.as_str(), user_id.as_str()),
            name: name.clone(),
            text: text.to_owned(),
        })
    }

    /// Build an outbound reply from this envelope.
    ///
    /// The result is an independent deep copy: mutating it never affects
    /// `self`. Its mode is [`REPLY_MODE`] and its text is replaced.
    pub fn reply(&self, text: &str) -> Self {
        let mut copy = self.clone();
        copy.mode = Some(REPLY_MODE.to_owned());
        copy.message
            .get_or_insert_with(MessageBody::default)
            .text = Some(text.to_owned());
        copy
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sender_extracts_all_fields() {
        let envelope = Envelope::new("lobby", "u1", "Alice", "つかれた");
        let sender = envelope.sender().unwrap();
        assert_eq!(sender.key, EntityKey::new("lobby", "u1"));
        assert_eq!(sender.name, "Alice");
        assert_eq!(sender.text, "つかれた");
    }

    #[test]
    fn sender_reports_first_missing_field() {
        let mut envelope = Envelope::new("lobby", "u1", "Alice", "hi");
        envelope.room = None;
        assert_eq!(envelope.sender(), Err(EnvelopeError::MissingField("room.id")));

        let mut envelope = Envelope::new("lobby", "u1", "Alice", "hi");
        if let Some(user) = envelope.user.as_mut() {
            user.name = None;
        }
        assert_eq!(
            envelope.sender(),
            Err(EnvelopeError::MissingField("user.name"))
        );

        let envelope = Envelope::default();
        assert_eq!(envelope.sender(), Err(EnvelopeError::MissingField("user")));
    }

    #[test]
    fn reply_is_an_isolated_copy() {
        let original = Envelope::new("lobby", "u1", "Alice", "つらい");
        let mut reply = original.reply("社会のこうげき！");

        assert_eq!(reply.mode.as_deref(), Some(REPLY_MODE));
        assert_eq!(reply.text(), Some("社会のこうげき！"));
        assert_eq!(original.mode, None);
        assert_eq!(original.text(), Some("つらい"));

        if let Some(user) = reply.user.as_mut() {
            user.name = Some("Mallory".to_owned());
        }
        let name = original.user.as_ref().and_then(|u| u.name.as_deref());
        assert_eq!(name, Some("Alice"));
    }

    #[test]
    fn unknown_fields_round_trip_into_replies() {
        let raw = r#"{
            "user": {"id": "u1", "name": "Alice", "avatar": "a.png"},
            "room": {"id": "lobby", "topic": "work"},
            "message": {"text": "ねむい", "ts": 1700000000},
            "platform": "slack"
        }"#;
        let envelope: Envelope = serde_json::from_str(raw).unwrap();
        let reply = envelope.reply("ok");
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["platform"], "slack");
        assert_eq!(json["user"]["avatar"], "a.png");
        assert_eq!(json["room"]["topic"], "work");
        assert_eq!(json["message"]["ts"], 1_700_000_000);
        assert_eq!(json["message"]["text"], "ok");
        assert_eq!(json["mode"], "reply");
    }
}
