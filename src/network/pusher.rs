//! Minimal client-side codec for the Pusher channel protocol (version 7).
//!
//! Only the frames this client actually exchanges are modeled: the
//! connection handshake, channel subscription, ping/pong, and channel
//! events. Everything else classifies as [`InboundFrame::Other`].

use serde::Deserialize;
use serde_json::{Value, json};

use crate::common::SubscribeError;

/// The single broadcast channel this client subscribes to.
pub const CHANNEL: &str = "chat-room";
/// The only channel event the backend triggers.
pub const NEW_MESSAGE_EVENT: &str = "new-message";

const PROTOCOL_VERSION: u8 = 7;

/// WebSocket URL for the provider's cluster-scoped endpoint.
pub fn connection_url(key: &str, cluster: &str) -> String {
    format!(
        "wss://ws-{cluster}.pusher.com/app/{key}?protocol={PROTOCOL_VERSION}&client=pusher_chat&version={}",
        env!("CARGO_PKG_VERSION")
    )
}

/// Outbound `pusher:subscribe` frame for a public channel (no auth field).
pub fn subscribe_frame(channel: &str) -> String {
    json!({
        "event": "pusher:subscribe",
        "data": { "channel": channel },
    })
    .to_string()
}

/// Outbound reply to a `pusher:ping`.
pub fn pong_frame() -> String {
    json!({ "event": "pusher:pong", "data": {} }).to_string()
}

/// An inbound frame, decoded and classified.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    ConnectionEstablished { socket_id: String },
    SubscriptionSucceeded { channel: String },
    Ping,
    ProtocolError { message: String },
    ChannelEvent {
        channel: String,
        event: String,
        payload: Value,
    },
    Other { event: String },
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct ConnectionEstablishedData {
    socket_id: String,
}

#[derive(Deserialize)]
struct ErrorData {
    #[serde(default)]
    message: String,
}

pub fn classify_frame(raw: &str) -> Result<InboundFrame, SubscribeError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    let payload = payload_value(envelope.data)?;

    let frame = match envelope.event.as_str() {
        "pusher:connection_established" => {
            let data: ConnectionEstablishedData = serde_json::from_value(payload)?;
            InboundFrame::ConnectionEstablished {
                socket_id: data.socket_id,
            }
        }
        "pusher_internal:subscription_succeeded" => InboundFrame::SubscriptionSucceeded {
            channel: envelope.channel.unwrap_or_default(),
        },
        "pusher:ping" => InboundFrame::Ping,
        "pusher:error" => {
            let data: ErrorData = serde_json::from_value(payload).unwrap_or(ErrorData {
                message: String::new(),
            });
            InboundFrame::ProtocolError {
                message: data.message,
            }
        }
        event if !event.starts_with("pusher") => match envelope.channel {
            Some(channel) => InboundFrame::ChannelEvent {
                channel,
                event: event.to_string(),
                payload,
            },
            None => InboundFrame::Other {
                event: event.to_string(),
            },
        },
        event => InboundFrame::Other {
            event: event.to_string(),
        },
    };

    Ok(frame)
}

/// The protocol double-encodes event payloads: `data` is usually a JSON
/// string that itself contains JSON. Some servers send a plain object, so
/// both forms are accepted.
fn payload_value(data: Option<Value>) -> Result<Value, serde_json::Error> {
    match data {
        Some(Value::String(inner)) => serde_json::from_str(&inner),
        Some(value) => Ok(value),
        None => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_url_embeds_key_and_cluster() {
        let url = connection_url("abc123", "eu");
        assert!(url.starts_with("wss://ws-eu.pusher.com/app/abc123?"));
        assert!(url.contains("protocol=7"));
    }

    #[test]
    fn classifies_connection_established() {
        // data is a string containing JSON, as the wire protocol sends it
        let raw = r#"{"event":"pusher:connection_established","data":"{\"socket_id\":\"123.456\",\"activity_timeout\":120}"}"#;
        assert_eq!(
            classify_frame(raw).unwrap(),
            InboundFrame::ConnectionEstablished {
                socket_id: "123.456".to_string()
            }
        );
    }

    #[test]
    fn classifies_subscription_succeeded() {
        let raw = r#"{"event":"pusher_internal:subscription_succeeded","channel":"chat-room","data":"{}"}"#;
        assert_eq!(
            classify_frame(raw).unwrap(),
            InboundFrame::SubscriptionSucceeded {
                channel: "chat-room".to_string()
            }
        );
    }

    #[test]
    fn classifies_ping() {
        let raw = r#"{"event":"pusher:ping","data":"{}"}"#;
        assert_eq!(classify_frame(raw).unwrap(), InboundFrame::Ping);
    }

    #[test]
    fn classifies_channel_event_with_string_encoded_payload() {
        let raw = r#"{"event":"new-message","channel":"chat-room","data":"{\"nickname\":\"Bob\",\"message\":\"yo\"}"}"#;
        match classify_frame(raw).unwrap() {
            InboundFrame::ChannelEvent {
                channel,
                event,
                payload,
            } => {
                assert_eq!(channel, CHANNEL);
                assert_eq!(event, NEW_MESSAGE_EVENT);
                assert_eq!(payload["nickname"], "Bob");
                assert_eq!(payload["message"], "yo");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn classifies_channel_event_with_plain_object_payload() {
        let raw = r#"{"event":"new-message","channel":"chat-room","data":{"nickname":"Bob","message":"yo"}}"#;
        assert!(matches!(
            classify_frame(raw).unwrap(),
            InboundFrame::ChannelEvent { .. }
        ));
    }

    #[test]
    fn unknown_pusher_events_are_other() {
        let raw = r#"{"event":"pusher:cache_miss","data":"{}"}"#;
        assert_eq!(
            classify_frame(raw).unwrap(),
            InboundFrame::Other {
                event: "pusher:cache_miss".to_string()
            }
        );
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(classify_frame("not json").is_err());
    }

    #[test]
    fn subscribe_frame_names_the_channel() {
        let frame: Value = serde_json::from_str(&subscribe_frame(CHANNEL)).unwrap();
        assert_eq!(frame["event"], "pusher:subscribe");
        assert_eq!(frame["data"]["channel"], "chat-room");
    }

    #[test]
    fn pong_frame_is_well_formed() {
        let frame: Value = serde_json::from_str(&pong_frame()).unwrap();
        assert_eq!(frame["event"], "pusher:pong");
    }
}
