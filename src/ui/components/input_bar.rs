use eframe::egui;

/// Draws the nickname and message fields plus the send button. Returns true
/// when the user asked to submit; validation and clearing are the caller's
/// concern.
pub fn render(ui: &mut egui::Ui, nickname: &mut String, message: &mut String) -> bool {
    let mut submit = false;

    ui.horizontal(|ui| {
        ui.label("Nickname:");
        ui.text_edit_singleline(nickname);
    });

    ui.horizontal(|ui| {
        let response = ui.text_edit_singleline(message);
        if ui.button("Send").clicked() {
            submit = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
    });

    submit
}
