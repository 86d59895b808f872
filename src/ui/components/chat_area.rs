use eframe::egui;

use crate::common::MessageOrigin;
use crate::ui::state::RenderedMessage;

pub fn render(ui: &mut egui::Ui, messages: &[RenderedMessage]) {
    // stick_to_bottom keeps the list scrolled to the newest message after
    // every render.
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink(false)
        .show(ui, |ui| {
            for entry in messages {
                let nickname_color = match entry.origin {
                    MessageOrigin::Sent => egui::Color32::LIGHT_GREEN,
                    MessageOrigin::Received => egui::Color32::LIGHT_BLUE,
                };

                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(nickname_color, format!("{}:", entry.message.nickname));
                    ui.label(&entry.message.message);
                    if entry.is_pending() {
                        ui.label(egui::RichText::new("(sending...)").weak());
                    }
                });
            }
        });
}
