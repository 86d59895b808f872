use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Domain model for a single chat message. This is exactly the wire shape:
/// the backend endpoint accepts it as the POST body and the pub/sub provider
/// delivers it as the `new-message` event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub nickname: String,
    pub message: String,
}

impl ChatMessage {
    /// Builds a message from raw input field contents. Both fields are
    /// trimmed; either being empty after trimming rejects the submission.
    /// Received messages are deserialized directly and skip this check.
    pub fn compose(nickname: &str, message: &str) -> Result<Self, ValidationError> {
        let nickname = nickname.trim();
        let message = message.trim();

        if nickname.is_empty() {
            return Err(ValidationError::EmptyNickname);
        }
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        Ok(Self {
            nickname: nickname.to_string(),
            message: message.to_string(),
        })
    }
}

/// Whether a rendered bubble was authored locally or arrived over the
/// broadcast channel. A sender's own echo comes back as `Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    Sent,
    Received,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_trims_both_fields() {
        let msg = ChatMessage::compose("  Ann ", " hi\n").unwrap();
        assert_eq!(msg.nickname, "Ann");
        assert_eq!(msg.message, "hi");
    }

    #[test]
    fn compose_rejects_empty_nickname() {
        assert_eq!(
            ChatMessage::compose("   ", "hi"),
            Err(ValidationError::EmptyNickname)
        );
    }

    #[test]
    fn compose_rejects_empty_message() {
        assert_eq!(
            ChatMessage::compose("Ann", " \t "),
            Err(ValidationError::EmptyMessage)
        );
    }

    #[test]
    fn wire_shape_is_flat_json() {
        let msg = ChatMessage::compose("Ann", "hi").unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"nickname":"Ann","message":"hi"}"#);
    }
}
