use eframe::egui::{self, Color32, Key, RichText, TextEdit, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

/// Render the login gate. The dashboard is not drawn until the session is open.
pub fn login_screen(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.15);
        ui.heading(RichText::new("Acceso Seguro").size(28.0).strong());
        ui.label("Plataforma de Apoyo Familiar - Facultad de Ingeniería");
        ui.add_space(16.0);

        egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
            ui.set_max_width(320.0);

            ui.label("Usuario");
            ui.add(TextEdit::singleline(&mut state.login.username).desired_width(280.0));

            ui.label("Contraseña");
            let password = ui.add(
                TextEdit::singleline(&mut state.login.password)
                    .password(true)
                    .desired_width(280.0),
            );
            let enter = password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            ui.add_space(8.0);
            if ui.button("Ingresar").clicked() || enter {
                state.submit_login();
            }

            if let Some(msg) = &state.login.error {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        });
    });
}
