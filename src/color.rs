use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RiskLevel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.45, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colour of each known risk level.
pub fn risk_color(level: RiskLevel) -> Color32 {
    match level {
        RiskLevel::Low => Color32::from_rgb(0x27, 0xAE, 0x60),
        RiskLevel::Medium => Color32::from_rgb(0xF1, 0xC4, 0x0F),
        RiskLevel::High => Color32::from_rgb(0xE6, 0x7E, 0x22),
        RiskLevel::VeryHigh => Color32::from_rgb(0xC0, 0x39, 0x2B),
    }
}

pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(0x29, 0x80, 0xB9);
pub const STUDENT_MARKER_COLOR: Color32 = Color32::from_rgb(0xC0, 0x39, 0x2B);

// ---------------------------------------------------------------------------
// Color mapping: risk label → Color32
// ---------------------------------------------------------------------------

/// Maps the risk labels present in a cohort to colours. Known levels keep
/// their fixed colour; any other label gets a generated one.
#[derive(Debug, Clone)]
pub struct RiskColorMap {
    extra: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl RiskColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut unknown: Vec<&str> = labels
            .into_iter()
            .filter(|l| RiskLevel::from_label(l).is_none())
            .collect();
        unknown.sort_unstable();
        unknown.dedup();

        let palette = generate_palette(unknown.len());
        let extra = unknown
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();

        RiskColorMap {
            extra,
            default_color: Color32::GRAY,
        }
    }

    /// Colour for a label; rows without a label use the default grey.
    pub fn color_for(&self, label: Option<&str>) -> Color32 {
        let Some(label) = label else {
            return self.default_color;
        };
        match RiskLevel::from_label(label) {
            Some(level) => risk_color(level),
            None => self
                .extra
                .get(label)
                .copied()
                .unwrap_or(self.default_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(3).len(), 3);
    }

    #[test]
    fn known_levels_keep_fixed_colors() {
        let map = RiskColorMap::new(["Alto", "Sin dato", "Bajo"]);
        assert_eq!(map.color_for(Some("Alto")), Color32::from_rgb(0xE6, 0x7E, 0x22));
        assert_eq!(map.color_for(Some("Bajo")), Color32::from_rgb(0x27, 0xAE, 0x60));
        assert_ne!(map.color_for(Some("Sin dato")), Color32::GRAY);
        assert_eq!(map.color_for(Some("never seen")), Color32::GRAY);
        assert_eq!(map.color_for(None), Color32::GRAY);
    }
}
