pub mod bridge;
pub mod pusher;

pub use bridge::DeliveryBridge;
