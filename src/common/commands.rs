use uuid::Uuid;

use super::types::ChatMessage;

/// Command the UI sends down to the delivery bridge.
#[derive(Debug, Clone)]
pub enum BridgeCommand {
    /// Submit one message to the backend endpoint. `token` identifies the
    /// optimistically rendered entry so the eventual confirm/fail event can
    /// be matched back to it.
    SendMessage { message: ChatMessage, token: Uuid },
}
