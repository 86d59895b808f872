pub mod commands;
pub mod error;
pub mod events;
pub mod types;

pub use commands::BridgeCommand;
pub use error::{DeliveryError, SubscribeError, ValidationError};
pub use events::BridgeEvent;
pub use types::{ChatMessage, MessageOrigin};
