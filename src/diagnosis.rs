use std::ops::RangeInclusive;

use crate::data::metrics::Metrics;

// ---------------------------------------------------------------------------
// Simulation input
// ---------------------------------------------------------------------------

pub const NEM_RANGE: RangeInclusive<u16> = 400..=1000;
pub const MOTIVATION_RANGE: RangeInclusive<u8> = 1..=7;
pub const FAILED_COURSES_RANGE: RangeInclusive<u8> = 0..=20;

/// Operator-entered profile of a hypothetical student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationInput {
    pub nem: u16,
    pub motivation: u8,
    pub failed_courses: u8,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            nem: 600,
            motivation: 4,
            failed_courses: 0,
        }
    }
}

impl SimulationInput {
    /// Clamp every field into its widget range.
    pub fn clamped(self) -> Self {
        Self {
            nem: self.nem.clamp(*NEM_RANGE.start(), *NEM_RANGE.end()),
            motivation: self
                .motivation
                .clamp(*MOTIVATION_RANGE.start(), *MOTIVATION_RANGE.end()),
            failed_courses: self
                .failed_courses
                .clamp(*FAILED_COURSES_RANGE.start(), *FAILED_COURSES_RANGE.end()),
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    MotivationalAlert,
    AcademicAlert,
    Stable,
}

impl Diagnosis {
    pub fn title(self) -> &'static str {
        match self {
            Diagnosis::MotivationalAlert => "ALERTA MOTIVACIONAL",
            Diagnosis::AcademicAlert => "ALERTA ACADÉMICA",
            Diagnosis::Stable => "ESTADO ESTABLE",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Diagnosis::MotivationalAlert => "La motivación es crítica. Se sugiere intervención.",
            Diagnosis::AcademicAlert => "Reprobación sobre el estándar.",
            Diagnosis::Stable => "El estudiante se encuentra en buenos rangos.",
        }
    }
}

/// One entry of the ordered rule table.
pub struct DiagnosisRule {
    pub name: &'static str,
    pub applies: fn(&SimulationInput) -> bool,
    pub outcome: Diagnosis,
}

/// Evaluated top to bottom; the first rule that applies decides.
pub const DIAGNOSIS_RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        name: "motivation below 4",
        applies: |input| input.motivation < 4,
        outcome: Diagnosis::MotivationalAlert,
    },
    DiagnosisRule {
        name: "more than one failed course",
        applies: |input| input.failed_courses > 1,
        outcome: Diagnosis::AcademicAlert,
    },
];

/// Outcome when no rule applies.
pub const FALLBACK_DIAGNOSIS: Diagnosis = Diagnosis::Stable;

/// Classify a simulated student. Input bounds are the caller's responsibility.
pub fn diagnose(input: &SimulationInput) -> Diagnosis {
    DIAGNOSIS_RULES
        .iter()
        .find(|rule| (rule.applies)(input))
        .map(|rule| {
            log::trace!("diagnosis rule matched: {}", rule.name);
            rule.outcome
        })
        .unwrap_or(FALLBACK_DIAGNOSIS)
}

// ---------------------------------------------------------------------------
// Assessment = diagnosis + cohort context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub diagnosis: Diagnosis,
    /// Present only when the cohort has a positive average duration.
    pub duration_note: Option<String>,
}

pub fn assess(input: &SimulationInput, metrics: &Metrics) -> Assessment {
    let duration_note = metrics.duration_available().then(|| {
        format!(
            "Contexto: La duración promedio real es de {:.1} semestres.",
            metrics.avg_duration
        )
    });
    Assessment {
        diagnosis: diagnose(input),
        duration_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(motivation: u8, failed_courses: u8) -> SimulationInput {
        SimulationInput {
            nem: 600,
            motivation,
            failed_courses,
        }
    }

    #[test]
    fn low_motivation_takes_precedence() {
        for m in 1..4 {
            for f in FAILED_COURSES_RANGE {
                assert_eq!(diagnose(&input(m, f)), Diagnosis::MotivationalAlert);
            }
        }
    }

    #[test]
    fn failed_courses_alert_when_motivated() {
        for m in 4..=7 {
            for f in 2..=20 {
                assert_eq!(diagnose(&input(m, f)), Diagnosis::AcademicAlert);
            }
        }
    }

    #[test]
    fn stable_otherwise() {
        for m in 4..=7 {
            for f in 0..=1 {
                assert_eq!(diagnose(&input(m, f)), Diagnosis::Stable);
            }
        }
    }

    #[test]
    fn scenarios() {
        assert_eq!(diagnose(&input(3, 0)), Diagnosis::MotivationalAlert);
        assert_eq!(diagnose(&input(5, 2)), Diagnosis::AcademicAlert);
        assert_eq!(diagnose(&input(6, 0)), Diagnosis::Stable);
    }

    #[test]
    fn duration_note_needs_positive_average() {
        let none = assess(&input(6, 0), &Metrics::default());
        assert_eq!(none.duration_note, None);
        assert_eq!(none.diagnosis, Diagnosis::Stable);

        let metrics = Metrics {
            total_count: 3,
            high_risk_count: 1,
            avg_duration: 11.26,
        };
        let with = assess(&input(2, 5), &metrics);
        assert_eq!(with.diagnosis, Diagnosis::MotivationalAlert);
        assert_eq!(
            with.duration_note.as_deref(),
            Some("Contexto: La duración promedio real es de 11.3 semestres.")
        );
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let raw = SimulationInput {
            nem: 1200,
            motivation: 0,
            failed_courses: 30,
        };
        assert_eq!(
            raw.clamped(),
            SimulationInput {
                nem: 1000,
                motivation: 1,
                failed_courses: 20,
            }
        );
        assert_eq!(SimulationInput::default().clamped(), SimulationInput::default());
    }
}
