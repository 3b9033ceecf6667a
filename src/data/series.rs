use std::collections::BTreeMap;

use super::filter::Cohort;
use super::model::RiskLevel;

/// Motivation scale of the survey, inclusive.
pub const MOTIVATION_LEVELS: std::ops::RangeInclusive<u8> = 1..=7;

/// Number of students per `Nivel_Riesgo` label.
///
/// Known levels come first in their natural order (Bajo → Muy Alto), then any
/// other label alphabetically. Levels with no students are left out.
pub fn risk_distribution(cohort: &Cohort<'_>) -> Vec<(String, usize)> {
    let mut known: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    let mut other: BTreeMap<String, usize> = BTreeMap::new();

    for row in &cohort.rows {
        let Some(label) = row.risk_label() else {
            continue;
        };
        match RiskLevel::from_label(label) {
            Some(level) => *known.entry(level).or_default() += 1,
            None => *other.entry(label.to_string()).or_default() += 1,
        }
    }

    known
        .into_iter()
        .map(|(level, n)| (level.label().to_string(), n))
        .chain(other)
        .collect()
}

/// Histogram of `Motivacion_Actual` over the levels 1..=7.
/// Index 0 holds level 1. Values outside the scale are ignored.
pub fn motivation_histogram(cohort: &Cohort<'_>) -> [usize; 7] {
    let mut bins = [0usize; 7];
    for value in cohort.rows.iter().filter_map(|r| r.motivation()) {
        let level = value.round();
        if (1.0..=7.0).contains(&level) {
            bins[level as usize - 1] += 1;
        }
    }
    bins
}

/// One cohort member on the NEM vs. motivation map.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub nem: f64,
    pub motivation: f64,
    pub risk_label: Option<String>,
    pub academic_confidence: Option<f64>,
}

/// Rows with both a numeric NEM and motivation.
pub fn scatter_points(cohort: &Cohort<'_>) -> Vec<ScatterPoint> {
    cohort
        .rows
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                nem: r.nem_score()?,
                motivation: r.motivation()?,
                risk_label: r.risk_label().map(str::to_string),
                academic_confidence: r.academic_confidence(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::career::resolve;
    use crate::data::filter::filter_cohort;
    use crate::data::loader::read_csv;

    const CSV: &str = "Nombre_Carrera,Nivel_Riesgo,Motivacion_Actual,NEM,Confianza_Academica\n\
                       X,Muy Alto,2,550,3.5\n\
                       X,Bajo,6,720,6\n\
                       X,Sin dato,9,,4\n\
                       X,Bajo,6,700,\n\
                       X,Alto,1,480,2\n";

    #[test]
    fn distribution_orders_known_levels_first() {
        let ds = resolve(read_csv(CSV.as_bytes()).unwrap()).unwrap();
        let cohort = filter_cohort(Some(&ds), "X");
        assert_eq!(
            risk_distribution(&cohort),
            vec![
                ("Bajo".to_string(), 2),
                ("Alto".to_string(), 1),
                ("Muy Alto".to_string(), 1),
                ("Sin dato".to_string(), 1),
            ]
        );
    }

    #[test]
    fn histogram_ignores_out_of_scale_values() {
        let ds = resolve(read_csv(CSV.as_bytes()).unwrap()).unwrap();
        let cohort = filter_cohort(Some(&ds), "X");
        assert_eq!(motivation_histogram(&cohort), [1, 1, 0, 0, 0, 2, 0]);
    }

    #[test]
    fn scatter_skips_rows_without_coordinates() {
        let ds = resolve(read_csv(CSV.as_bytes()).unwrap()).unwrap();
        let cohort = filter_cohort(Some(&ds), "X");
        let points = scatter_points(&cohort);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].risk_label.as_deref(), Some("Muy Alto"));
        assert_eq!(points[2].academic_confidence, None);
    }

    #[test]
    fn empty_cohort_has_empty_series() {
        let cohort = Cohort::empty();
        assert!(risk_distribution(&cohort).is_empty());
        assert_eq!(motivation_histogram(&cohort), [0; 7]);
        assert!(scatter_points(&cohort).is_empty());
    }
}
