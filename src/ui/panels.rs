use eframe::egui::{self, Color32, DragValue, RichText, Slider, Ui};

use crate::color::{risk_color, HISTOGRAM_COLOR};
use crate::data::model::RiskLevel;
use crate::diagnosis::{Diagnosis, FAILED_COURSES_RANGE, MOTIVATION_RANGE, NEM_RANGE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – session, career filter, simulation inputs
// ---------------------------------------------------------------------------

/// Render the left simulation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(user) = state.session.username() {
        ui.label(format!("Sesión: {user}"));
    }
    if ui.button("Cerrar Sesión").clicked() {
        state.logout();
        return;
    }
    ui.separator();

    ui.heading("Panel de Simulación");
    ui.label("Ajuste los valores para simular el estado del alumno.");
    ui.add_space(4.0);

    // ---- Career selector ----
    if state.dataset.is_some() {
        ui.strong("Seleccione Carrera:");
        let current = state.selected_career.clone().unwrap_or_default();
        let mut picked = None;
        egui::ComboBox::from_id_salt("career")
            .selected_text(&current)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for name in &state.careers {
                    if ui.selectable_label(current == *name, name).clicked() {
                        picked = Some(name.clone());
                    }
                }
            });
        if let Some(name) = picked {
            if name != current {
                state.select_career(name);
            }
        }
    }
    ui.separator();

    // ---- Simulated student ----
    let mut input = state.simulation;

    ui.label("Puntaje NEM");
    ui.add(DragValue::new(&mut input.nem).range(NEM_RANGE).speed(1.0));

    ui.label("Motivación Actual (1-7)");
    ui.add(Slider::new(&mut input.motivation, MOTIVATION_RANGE));

    ui.label("Asignaturas Reprobadas");
    ui.add(DragValue::new(&mut input.failed_courses).range(FAILED_COURSES_RANGE));

    if input != state.simulation {
        state.set_simulation(input);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Recargar datos").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.cache.path().display().to_string());
        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} estudiantes cargados, {} en la carrera",
                ds.dataset.len(),
                state.cohort_indices.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, title: &str, value: String, caption: &str, caption_color: Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(title);
        ui.label(RichText::new(value).size(26.0).strong());
        ui.label(RichText::new(caption).color(caption_color).small());
    });
}

/// Total / high-risk / simulated-motivation summary row.
pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let m = &state.metrics;
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total Estudiantes",
            m.total_count.to_string(),
            "Muestra",
            Color32::GRAY,
        );
        metric_card(
            &mut cols[1],
            "Estudiantes en Riesgo",
            m.high_risk_count.to_string(),
            "Alto / Muy Alto",
            risk_color(RiskLevel::VeryHigh),
        );
        metric_card(
            &mut cols[2],
            "Simulación Actual",
            format!("{}/7", state.simulation.motivation),
            "Nivel Motivación",
            Color32::GRAY,
        );
    });
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

/// Personalised diagnosis of the simulated student.
pub fn diagnosis_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Diagnóstico Personalizado");
    let assessment = state.assessment();

    let color = match assessment.diagnosis {
        Diagnosis::MotivationalAlert => risk_color(RiskLevel::VeryHigh),
        Diagnosis::AcademicAlert => risk_color(RiskLevel::High),
        Diagnosis::Stable => risk_color(RiskLevel::Low),
    };
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(assessment.diagnosis.title()).color(color).strong());
        ui.label(assessment.diagnosis.message());
    });

    if let Some(note) = &assessment.duration_note {
        ui.add_space(4.0);
        ui.label(RichText::new(note).color(HISTOGRAM_COLOR));
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir base de estudiantes")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_file(path);
    }
}
