use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, Legend, LineStyle, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text,
    VLine,
};

use crate::color::{RiskColorMap, HISTOGRAM_COLOR, STUDENT_MARKER_COLOR};
use crate::data::filter::Cohort;
use crate::data::series::{
    motivation_histogram, risk_distribution, scatter_points, ScatterPoint, MOTIVATION_LEVELS,
};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;
const NO_DATA: &str = "No hay datos suficientes.";

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new(NO_DATA).italics().color(Color32::GRAY));
}

// ---------------------------------------------------------------------------
// Risk distribution
// ---------------------------------------------------------------------------

/// Share of students per risk level, one coloured bar per level.
pub fn risk_chart(ui: &mut Ui, cohort: &Cohort<'_>) {
    ui.heading("Distribución de Riesgo");
    let distribution = risk_distribution(cohort);
    if distribution.is_empty() {
        no_data(ui);
        return;
    }

    let total: usize = distribution.iter().map(|(_, n)| n).sum();
    let colors = RiskColorMap::new(distribution.iter().map(|(label, _)| label.as_str()));

    let bars: Vec<Bar> = distribution
        .iter()
        .enumerate()
        .map(|(i, (label, n))| {
            let share = *n as f64 * 100.0 / total as f64;
            Bar::new(i as f64, share)
                .name(format!("{label} ({n})"))
                .fill(colors.color_for(Some(label.as_str())))
                .width(0.7)
        })
        .collect();

    Plot::new("risk_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("% de estudiantes")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Nivel_Riesgo"));
        });
}

// ---------------------------------------------------------------------------
// Motivation histogram
// ---------------------------------------------------------------------------

/// Cohort motivation counts with the simulated student marked.
pub fn motivation_chart(ui: &mut Ui, cohort: &Cohort<'_>, student_motivation: u8) {
    ui.heading("Distribución de Motivación");
    if cohort.is_empty() {
        no_data(ui);
        return;
    }

    let bins = motivation_histogram(cohort);
    let bars: Vec<Bar> = MOTIVATION_LEVELS
        .zip(bins)
        .map(|(level, count)| Bar::new(level as f64, count as f64).width(0.9))
        .collect();
    let peak = bins.iter().copied().max().unwrap_or(0) as f64;
    let x = student_motivation as f64;

    Plot::new("motivation_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Nivel (1-7)")
        .y_axis_label("Cantidad")
        .include_x(0.5)
        .include_x(7.5)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(HISTOGRAM_COLOR).name("Carrera"));
            plot_ui.vline(
                VLine::new(x)
                    .color(STUDENT_MARKER_COLOR)
                    .width(2.0)
                    .style(LineStyle::dashed_loose())
                    .name("Alumno"),
            );
            plot_ui.text(Text::new(
                PlotPoint::new(x, peak * 1.05 + 0.5),
                RichText::new("Alumno").color(STUDENT_MARKER_COLOR),
            ));
        });
}

// ---------------------------------------------------------------------------
// Location map
// ---------------------------------------------------------------------------

fn hover_text(points: &[ScatterPoint], value: &PlotPoint) -> String {
    let confidence = points
        .iter()
        .find(|p| (p.nem - value.x).abs() < 1e-6 && (p.motivation - value.y).abs() < 1e-6)
        .and_then(|p| p.academic_confidence);
    match confidence {
        Some(c) => format!(
            "NEM: {:.0}\nMotivación: {:.0}\nConfianza: {c}",
            value.x, value.y
        ),
        None => format!("NEM: {:.0}\nMotivación: {:.0}", value.x, value.y),
    }
}

/// NEM vs. motivation of the cohort, coloured by risk, with the simulated
/// student overlaid as a highlighted marker.
pub fn location_map(ui: &mut Ui, state: &AppState) {
    ui.heading("Mapa de Ubicación");
    ui.label("Rendimiento (NEM) vs. Motivación");

    let cohort = state.cohort();
    let points = scatter_points(&cohort);
    if points.is_empty() {
        ui.label(RichText::new("Faltan datos para generar el mapa.").italics());
        return;
    }

    // One series per risk label, in the same order as the risk chart.
    let mut labels: Vec<Option<String>> = risk_distribution(&cohort)
        .into_iter()
        .map(|(label, _)| Some(label))
        .collect();
    if points.iter().any(|p| p.risk_label.is_none()) {
        labels.push(None);
    }
    let colors = RiskColorMap::new(labels.iter().flatten().map(String::as_str));

    let series: Vec<Points> = labels
        .iter()
        .filter_map(|label| {
            let coords: Vec<[f64; 2]> = points
                .iter()
                .filter(|p| p.risk_label == *label)
                .map(|p| [p.nem, p.motivation])
                .collect();
            if coords.is_empty() {
                return None;
            }
            Some(
                Points::new(PlotPoints::from(coords))
                    .name(label.as_deref().unwrap_or("Sin clasificar"))
                    .color(colors.color_for(label.as_deref()))
                    .shape(MarkerShape::Circle)
                    .radius(3.5),
            )
        })
        .collect();

    let student = Points::new(PlotPoints::from(vec![[
        state.simulation.nem as f64,
        state.simulation.motivation as f64,
    ]]))
    .name("ALUMNO")
    .color(Color32::BLACK)
    .shape(MarkerShape::Asterisk)
    .filled(true)
    .radius(9.0);

    Plot::new("location_map")
        .height(CHART_HEIGHT + 60.0)
        .legend(Legend::default())
        .x_axis_label("NEM")
        .y_axis_label("Motivacion_Actual")
        .label_formatter(move |_name, value| hover_text(&points, value))
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(s);
            }
            plot_ui.points(student);
        });
}
