use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{login, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentMonitorApp {
    pub state: AppState,
}

impl StudentMonitorApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for StudentMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.session.is_logged_in() {
            egui::CentralPanel::default().show(ctx, |ui| {
                login::login_screen(ui, &mut self.state);
            });
            return;
        }

        self.state.ensure_loaded();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: session + simulation ----
        egui::SidePanel::left("simulation_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let career = state.selected_career.as_deref().unwrap_or_default();
    ui.heading(RichText::new(format!("Tablero de Gestión: {career}")).size(24.0));

    if let Some(err) = &state.data_error {
        ui.label(RichText::new(err).color(Color32::RED).strong());
    }
    ui.add_space(6.0);

    panels::metrics_row(ui, state);
    ui.separator();

    let cohort = state.cohort();
    ui.columns(2, |cols: &mut [Ui]| {
        plot::risk_chart(&mut cols[0], &cohort);
        plot::motivation_chart(&mut cols[1], &cohort, state.simulation.motivation);
    });
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        panels::diagnosis_panel(&mut cols[0], state);
        plot::location_map(&mut cols[1], state);
    });
    ui.separator();

    egui::CollapsingHeader::new(RichText::new(format!("Estudiantes ({})", cohort.len())).strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| table::cohort_table(ui, &cohort));
}
