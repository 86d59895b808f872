use uuid::Uuid;

use crate::common::{ChatMessage, MessageOrigin};

/// One rendered chat bubble. Optimistic entries keep their token until the
/// bridge confirms or fails the delivery.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub message: ChatMessage,
    pub origin: MessageOrigin,
    token: Option<Uuid>,
}

impl RenderedMessage {
    /// Still waiting for the delivery outcome.
    pub fn is_pending(&self) -> bool {
        self.token.is_some()
    }
}

/// Local UI state. The message list is append-only and unbounded; the only
/// removal ever performed is the rollback of a failed optimistic entry.
pub struct AppState {
    pub messages: Vec<RenderedMessage>,
    pub nickname_input: String,
    pub message_input: String,
    /// Current blocking alert, if any. Dismissed by the user.
    pub alert: Option<String>,
    pub subscribed: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            nickname_input: String::new(),
            message_input: String::new(),
            alert: None,
            subscribed: false,
        }
    }

    /// Tentative apply: renders the locally authored message immediately and
    /// returns the token the eventual confirm/rollback is keyed on.
    pub fn push_pending(&mut self, message: ChatMessage) -> Uuid {
        let token = Uuid::new_v4();
        self.messages.push(RenderedMessage {
            message,
            origin: MessageOrigin::Sent,
            token: Some(token),
        });
        token
    }

    /// Appends a broadcast message exactly as received. No deduplication:
    /// the sender's own echo lands here as a second, `Received`-tagged copy.
    pub fn push_received(&mut self, message: ChatMessage) {
        self.messages.push(RenderedMessage {
            message,
            origin: MessageOrigin::Received,
            token: None,
        });
    }

    /// Confirm phase: the entry stands, the token is retired.
    pub fn confirm(&mut self, token: Uuid) {
        if let Some(entry) = self
            .messages
            .iter_mut()
            .find(|entry| entry.token == Some(token))
        {
            entry.token = None;
        }
    }

    /// Rollback phase: removes exactly the entry carrying `token` and
    /// returns its message so the composed text can be restored.
    pub fn rollback(&mut self, token: Uuid) -> Option<ChatMessage> {
        let index = self
            .messages
            .iter()
            .position(|entry| entry.token == Some(token))?;
        Some(self.messages.remove(index).message)
    }

    pub fn raise_alert(&mut self, text: impl Into<String>) {
        self.alert = Some(text.into());
    }
}
