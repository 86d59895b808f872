use uuid::Uuid;

use super::types::ChatMessage;

/// Event the delivery bridge sends up to the UI.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// A broadcast arrived on the subscribed channel. Includes the sender's
    /// own echo; the bridge makes no attempt to suppress it.
    MessageReceived(ChatMessage),
    /// The POST for the optimistic entry with this token got a 2xx.
    DeliveryConfirmed(Uuid),
    /// The POST failed; the optimistic entry must be rolled back.
    DeliveryFailed { token: Uuid, reason: String },
    /// The broadcast subscription is up.
    Subscribed,
    /// The subscription could not be established or dropped. Sending still
    /// works; no automatic reconnect is attempted.
    SubscriptionLost { reason: String },
}
