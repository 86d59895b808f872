use thiserror::Error;

/// Rejected submission input. Blocks the submit, changes no state, and is
/// surfaced to the user as an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a nickname")]
    EmptyNickname,
    #[error("please enter a message")]
    EmptyMessage,
}

/// Failed message submission. The optimistic render is rolled back; the
/// user may resubmit manually. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server rejected the message: HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("delivery bridge is not running")]
    BridgeUnavailable,
}

/// Failure while establishing or holding the broadcast subscription.
/// Never fatal: the send path keeps working without it.
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("malformed protocol frame: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("provider closed the connection during handshake")]
    HandshakeClosed,
}
