use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{BridgeCommand, BridgeEvent, ChatMessage, DeliveryError, ValidationError};

use super::components::{alert, chat_area, input_bar};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<BridgeCommand>,
    event_receiver: mpsc::Receiver<BridgeEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<BridgeCommand>,
        event_receiver: mpsc::Receiver<BridgeEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_bridge_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            apply_bridge_event(&mut self.state, event);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_bridge_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Pusher Chat");
                if !self.state.subscribed {
                    ui.label(egui::RichText::new("(broadcasts offline)").weak());
                }
            });
            ui.separator();

            chat_area::render(ui, &self.state.messages);

            ui.separator();
            if input_bar::render(
                ui,
                &mut self.state.nickname_input,
                &mut self.state.message_input,
            ) {
                // Validation failures already raised an alert; nothing else
                // to do here.
                let _ = submit_message(&mut self.state, &self.command_sender);
            }
        });

        alert::render(ctx, &mut self.state.alert);

        ctx.request_repaint();
    }
}

/// Applies one bridge event to the UI state. Broadcast receipts are always
/// appended verbatim; delivery outcomes resolve the matching optimistic
/// entry (confirm keeps it, failure rolls it back and alerts).
pub(crate) fn apply_bridge_event(state: &mut AppState, event: BridgeEvent) {
    match event {
        BridgeEvent::MessageReceived(message) => state.push_received(message),
        BridgeEvent::DeliveryConfirmed(token) => state.confirm(token),
        BridgeEvent::DeliveryFailed { token, reason } => {
            if let Some(message) = state.rollback(token) {
                // Hand the composed text back unless the user already
                // started typing the next message.
                if state.message_input.trim().is_empty() {
                    state.message_input = message.message;
                }
            }
            state.raise_alert(format!("Could not send the message: {reason}"));
        }
        BridgeEvent::Subscribed => state.subscribed = true,
        BridgeEvent::SubscriptionLost { .. } => state.subscribed = false,
    }
}

/// Submission path: validate, render optimistically, clear the input, hand
/// the message to the bridge. A rejected hand-off is an immediate delivery
/// failure and rolls the tentative entry straight back.
pub(crate) fn submit_message(
    state: &mut AppState,
    command_sender: &mpsc::Sender<BridgeCommand>,
) -> Result<(), ValidationError> {
    let message = match ChatMessage::compose(&state.nickname_input, &state.message_input) {
        Ok(message) => message,
        Err(err) => {
            state.raise_alert(err.to_string());
            return Err(err);
        }
    };

    let token = state.push_pending(message.clone());
    state.message_input.clear();

    if let Err(err) = command_sender.try_send(BridgeCommand::SendMessage { message, token }) {
        log::error!("Failed to hand message to the delivery bridge: {err}");
        if let Some(message) = state.rollback(token) {
            state.message_input = message.message;
        }
        state.raise_alert(DeliveryError::BridgeUnavailable.to_string());
    }

    Ok(())
}
