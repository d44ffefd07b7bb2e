//! Discord REST wire types.
//!
//! These are Discord-specific request/response structures used for HTTP
//! communication. They are NOT the platform-agnostic message types from
//! chorus-types -- fetched messages are converted at the client boundary.

use serde::{Deserialize, Serialize};

use chorus_types::message::ChannelMessage;

/// Response shape of `GET /users/@me`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
}

/// A message as returned by `GET /channels/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordMessage {
    pub id: String,
    pub author: DiscordAuthor,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
}

/// The author object embedded in a Discord message.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordAuthor {
    pub id: String,
}

impl From<DiscordMessage> for ChannelMessage {
    fn from(message: DiscordMessage) -> Self {
        ChannelMessage {
            id: message.id,
            author_id: message.author.id,
            content: message.content,
            kind: message.kind,
        }
    }
}

/// Request body for `POST /channels/{id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessage<'a> {
    pub content: &'a str,
    /// Present only for threaded replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference<'a>>,
}

/// Reference linking a sent message to the message it answers.
#[derive(Debug, Clone, Serialize)]
pub struct MessageReference<'a> {
    pub message_id: &'a str,
}

/// Response shape of a successful message create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMessage {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discord_message_deserialization() {
        let json = r#"{
            "id": "1334961242347532298",
            "type": 0,
            "content": "hey everyone",
            "author": {"id": "987654321098765432", "username": "someone"},
            "timestamp": "2025-02-01T10:30:00.000000+00:00"
        }"#;
        let message: DiscordMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, "1334961242347532298");
        assert_eq!(message.author.id, "987654321098765432");
        assert_eq!(message.content, "hey everyone");
        assert_eq!(message.kind, 0);
    }

    #[test]
    fn test_missing_content_and_type_default() {
        let json = r#"{"id": "1", "author": {"id": "2"}}"#;
        let message: DiscordMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.content, "");
        assert_eq!(message.kind, 0);
    }

    #[test]
    fn test_conversion_to_channel_message() {
        let message = DiscordMessage {
            id: "100".to_string(),
            author: DiscordAuthor {
                id: "42".to_string(),
            },
            content: "hello".to_string(),
            kind: 8,
        };
        let converted = ChannelMessage::from(message);
        assert_eq!(converted.id, "100");
        assert_eq!(converted.author_id, "42");
        assert_eq!(converted.kind, 8);
    }

    #[test]
    fn test_create_message_serialization_plain() {
        let payload = CreateMessage {
            content: "hello",
            message_reference: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["content"], "hello");
        // message_reference must not appear for non-threaded sends
        assert!(json.get("message_reference").is_none());
    }

    #[test]
    fn test_create_message_serialization_threaded() {
        let payload = CreateMessage {
            content: "hello",
            message_reference: Some(MessageReference { message_id: "100" }),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["message_reference"]["message_id"], "100");
    }
}
