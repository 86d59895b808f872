use eframe::egui;

/// Blocking user-facing alert. Modal: the rest of the UI is inert until the
/// user dismisses it.
pub fn render(ctx: &egui::Context, alert: &mut Option<String>) {
    let Some(text) = alert.clone() else {
        return;
    };

    let response = egui::Modal::new(egui::Id::new("chat_alert")).show(ctx, |ui| {
        ui.label(text);
        ui.separator();
        if ui.button("OK").clicked() {
            *alert = None;
        }
    });

    if response.should_close() {
        *alert = None;
    }
}
