use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::Cohort;

const ROW_HEIGHT: f32 = 18.0;

/// All columns of the selected cohort, pass-through columns included.
pub fn cohort_table(ui: &mut Ui, cohort: &Cohort<'_>) {
    if cohort.is_empty() {
        ui.label("Sin estudiantes para la carrera seleccionada.");
        return;
    }

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(320.0)
            .columns(Column::auto().at_least(60.0), cohort.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for col in cohort.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, cohort.len(), |mut row| {
                    let record = cohort.rows[row.index()];
                    for col in cohort.columns {
                        row.col(|ui: &mut Ui| {
                            let text = record.get(col).map(|v| v.to_string()).unwrap_or_default();
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
