use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::{BridgeCommand, BridgeEvent, ChatMessage, DeliveryError, SubscribeError};
use crate::config::AppConfig;

use super::pusher::{self, InboundFrame};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Bridges local submissions to the backend endpoint and remote broadcasts
/// back to the UI. Runs on its own tokio task; talks to the UI exclusively
/// through the command/event channels.
pub struct DeliveryBridge {
    config: AppConfig,
    http: reqwest::Client,
    event_sender: mpsc::Sender<BridgeEvent>,
    command_receiver: mpsc::Receiver<BridgeCommand>,
}

impl DeliveryBridge {
    pub fn new(
        config: AppConfig,
        event_sender: mpsc::Sender<BridgeEvent>,
        command_receiver: mpsc::Receiver<BridgeCommand>,
    ) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        if self.config.has_placeholder_credentials() {
            // Not a guarded precondition: the connection is still attempted
            // and fails downstream in the provider if the values are wrong.
            log::warn!(
                "Pusher key/cluster still set to placeholders; edit the config file before expecting broadcasts"
            );
        }

        let mut socket = match self.connect_subscription().await {
            Ok(stream) => {
                log::info!("Subscribed to channel `{}`", pusher::CHANNEL);
                Some(stream)
            }
            Err(err) => {
                log::error!("Broadcast subscription failed: {err}");
                self.notify(BridgeEvent::SubscriptionLost {
                    reason: err.to_string(),
                })
                .await;
                None
            }
        };

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        // UI side dropped; nothing left to bridge.
                        None => break,
                    }
                }
                frame = next_frame(&mut socket) => {
                    match frame {
                        Some(Ok(message)) => {
                            if let Some(stream) = socket.as_mut() {
                                self.handle_frame(message, stream).await;
                            }
                        }
                        Some(Err(err)) => {
                            log::error!("Subscription stream error: {err}");
                            self.notify(BridgeEvent::SubscriptionLost {
                                reason: err.to_string(),
                            })
                            .await;
                            socket = None;
                        }
                        None => {
                            log::warn!("Provider closed the subscription stream");
                            self.notify(BridgeEvent::SubscriptionLost {
                                reason: "connection closed".to_string(),
                            })
                            .await;
                            socket = None;
                        }
                    }
                }
            }
        }
    }

    /// Connects to the provider, waits for the connection handshake, then
    /// asks for the broadcast channel. Subscription confirmation arrives
    /// later on the stream and is handled by the main loop.
    async fn connect_subscription(&self) -> Result<WsStream, SubscribeError> {
        let url = pusher::connection_url(&self.config.pusher_key, &self.config.pusher_cluster);
        let (mut stream, _response) = connect_async(url.as_str()).await?;

        while let Some(frame) = stream.next().await {
            let message = frame?;
            let Ok(text) = message.into_text() else {
                continue;
            };
            match pusher::classify_frame(text.as_str())? {
                InboundFrame::ConnectionEstablished { socket_id } => {
                    log::info!("Connected to provider, socket_id={socket_id}");
                    stream
                        .send(Message::text(pusher::subscribe_frame(pusher::CHANNEL)))
                        .await?;
                    return Ok(stream);
                }
                InboundFrame::Ping => {
                    stream.send(Message::text(pusher::pong_frame())).await?;
                }
                InboundFrame::ProtocolError { message } => {
                    log::warn!("Provider error during handshake: {message}");
                }
                _ => {}
            }
        }

        Err(SubscribeError::HandshakeClosed)
    }

    /// Fire-and-forget submission: each send runs on its own task so an
    /// in-flight POST never blocks the subscription stream. The outcome
    /// comes back to the UI as a confirm or fail event for `token`.
    fn handle_command(&self, command: BridgeCommand) {
        match command {
            BridgeCommand::SendMessage { message, token } => {
                let http = self.http.clone();
                let endpoint = self.config.endpoint_url.clone();
                let event_sender = self.event_sender.clone();

                tokio::spawn(async move {
                    let event = match submit_to_endpoint(&http, &endpoint, &message).await {
                        Ok(()) => BridgeEvent::DeliveryConfirmed(token),
                        Err(err) => {
                            log::error!("Message delivery failed: {err}");
                            BridgeEvent::DeliveryFailed {
                                token,
                                reason: err.to_string(),
                            }
                        }
                    };
                    if let Err(err) = event_sender.send(event).await {
                        log::warn!("Failed to report delivery outcome to UI: {err}");
                    }
                });
            }
        }
    }

    async fn handle_frame(&self, message: Message, stream: &mut WsStream) {
        let Ok(text) = message.into_text() else {
            return;
        };
        if text.is_empty() {
            return;
        }

        let frame = match pusher::classify_frame(text.as_str()) {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("Dropping malformed frame: {err}");
                return;
            }
        };

        match frame {
            InboundFrame::ChannelEvent {
                channel,
                event,
                payload,
            } if channel == pusher::CHANNEL && event == pusher::NEW_MESSAGE_EVENT => {
                match serde_json::from_value::<ChatMessage>(payload) {
                    Ok(chat_message) => {
                        self.notify(BridgeEvent::MessageReceived(chat_message)).await;
                    }
                    Err(err) => {
                        log::warn!("`{}` event with unexpected payload: {err}", event);
                    }
                }
            }
            InboundFrame::ChannelEvent { channel, event, .. } => {
                log::debug!("Ignoring event `{event}` on channel `{channel}`");
            }
            InboundFrame::Ping => {
                if let Err(err) = stream.send(Message::text(pusher::pong_frame())).await {
                    log::warn!("Failed to answer provider ping: {err}");
                }
            }
            InboundFrame::SubscriptionSucceeded { channel } => {
                log::info!("Subscription to `{channel}` confirmed");
                self.notify(BridgeEvent::Subscribed).await;
            }
            InboundFrame::ProtocolError { message } => {
                log::warn!("Provider error: {message}");
            }
            InboundFrame::ConnectionEstablished { .. } | InboundFrame::Other { .. } => {}
        }
    }

    async fn notify(&self, event: BridgeEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to notify UI: {err}");
        }
    }
}

/// Resolves to the next subscription frame, or never if the subscription is
/// down (sending keeps working without it).
async fn next_frame(
    socket: &mut Option<WsStream>,
) -> Option<Result<Message, tokio_tungstenite::tungstenite::Error>> {
    match socket.as_mut() {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

/// POSTs the message JSON to the backend endpoint. Any 2xx is success and
/// the response body is ignored; everything else is a delivery failure.
pub async fn submit_to_endpoint(
    http: &reqwest::Client,
    endpoint: &str,
    message: &ChatMessage,
) -> Result<(), DeliveryError> {
    let response = http.post(endpoint).json(message).send().await?;
    if response.status().is_success() {
        Ok(())
    } else {
        Err(DeliveryError::Status(response.status()))
    }
}
