use super::filter::Cohort;
use super::model::CellValue;

/// Summary statistics of one cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub total_count: usize,
    /// Rows with `Nivel_Riesgo` of `Alto` or `Muy Alto`.
    pub high_risk_count: usize,
    /// Mean program duration in semesters, 0 when not available.
    pub avg_duration: f64,
}

impl Metrics {
    /// Whether the duration context can be shown.
    pub fn duration_available(&self) -> bool {
        self.avg_duration > 0.0
    }
}

/// Compute [`Metrics`] over a cohort snapshot. An empty cohort gives all zeros.
pub fn aggregate(cohort: &Cohort<'_>) -> Metrics {
    if cohort.is_empty() {
        return Metrics::default();
    }

    let high_risk_count = cohort
        .rows
        .iter()
        .filter(|r| r.risk_level().is_some_and(|level| level.is_high()))
        .count();

    Metrics {
        total_count: cohort.len(),
        high_risk_count,
        avg_duration: average_duration(cohort),
    }
}

/// Mean of the first `duracion` column, skipping non-numeric cells.
fn average_duration(cohort: &Cohort<'_>) -> f64 {
    let Some(column) = cohort.duration_column() else {
        return 0.0;
    };
    let values: Vec<f64> = cohort
        .rows
        .iter()
        .filter_map(|r| r.get(column).and_then(CellValue::as_f64))
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::career::{resolve, ResolvedDataset};
    use crate::data::filter::filter_cohort;
    use crate::data::loader::read_csv;
    use crate::data::model::COL_DISPLAY_NAME;

    fn resolved(csv: &str) -> ResolvedDataset {
        resolve(read_csv(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn empty_cohort_is_all_zero() {
        let m = aggregate(&Cohort::empty());
        assert_eq!(m, Metrics::default());
        assert_eq!((m.total_count, m.high_risk_count, m.avg_duration), (0, 0, 0.0));
        assert!(!m.duration_available());
    }

    #[test]
    fn five_student_cohort() {
        let ds = resolved(
            "Carrera_ID,Nivel_Riesgo,Motivacion_Actual,NEM,Duracion_Semestres\n\
             13072,Alto,3,600,12\n\
             13072,Bajo,6,700,10\n\
             13072,Alto,4,650,11\n\
             13072,Medio,5,620,\n\
             13072,Bajo,7,710,11\n",
        );
        assert_eq!(
            ds.dataset.records[0].get(COL_DISPLAY_NAME).unwrap().to_string(),
            "Ing. Civil Industrial"
        );
        let m = aggregate(&filter_cohort(Some(&ds), "Ing. Civil Industrial"));
        assert_eq!(m.total_count, 5);
        assert_eq!(m.high_risk_count, 2);
        assert!((m.avg_duration - 11.0).abs() < 1e-9);
        assert!(m.duration_available());
    }

    #[test]
    fn very_high_counts_as_high_risk() {
        let ds = resolved("Nombre_Carrera,Nivel_Riesgo\nX,Muy Alto\nX,Medio\nX,alto\n");
        let m = aggregate(&filter_cohort(Some(&ds), "X"));
        assert_eq!(m.high_risk_count, 1);
    }

    #[test]
    fn missing_duration_column_reports_zero() {
        let ds = resolved("Nombre_Carrera,Nivel_Riesgo\nX,Alto\n");
        let m = aggregate(&filter_cohort(Some(&ds), "X"));
        assert_eq!(m.total_count, 1);
        assert_eq!(m.avg_duration, 0.0);
        assert!(!m.duration_available());
    }

    #[test]
    fn first_duration_column_wins() {
        let ds = resolved("Nombre_Carrera,DURACION_real,duracion_teorica\nX,9,20\nX,11,20\n");
        let m = aggregate(&filter_cohort(Some(&ds), "X"));
        assert!((m.avg_duration - 10.0).abs() < 1e-9);
    }
}
