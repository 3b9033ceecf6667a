use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known column names of `base_app_unificada.csv`
// ---------------------------------------------------------------------------

pub const COL_RISK_LEVEL: &str = "Nivel_Riesgo";
pub const COL_MOTIVATION: &str = "Motivacion_Actual";
pub const COL_NEM: &str = "NEM";
pub const COL_CONFIDENCE: &str = "Confianza_Academica";
pub const COL_CAREER_ID: &str = "Carrera_ID";
pub const COL_CAREER_NAME: &str = "Nombre_Carrera";
/// Display column added by the career resolver.
pub const COL_DISPLAY_NAME: &str = "Nombre_Visual";
/// Substring (lowercase) identifying the program-duration column.
pub const DURATION_MARKER: &str = "duracion";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the CSV
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, guessed from the CSV text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "nan"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field.
    ///
    /// Numbers tolerate surrounding spaces; text is kept verbatim.
    pub fn parse(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        let number = s.trim();
        if let Ok(i) = number.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = number.parse::<f64>() {
            return if f.is_nan() {
                CellValue::Null
            } else {
                CellValue::Float(f)
            };
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Numeric interpretation, `None` for text, booleans and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// RiskLevel – upstream categorical classification
// ---------------------------------------------------------------------------

/// Risk classification as it appears in the `Nivel_Riesgo` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Parse the dataset label. Matching is exact, as in the source data.
    pub fn from_label(label: &str) -> Option<RiskLevel> {
        match label {
            "Bajo" => Some(RiskLevel::Low),
            "Medio" => Some(RiskLevel::Medium),
            "Alto" => Some(RiskLevel::High),
            "Muy Alto" => Some(RiskLevel::VeryHigh),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Bajo",
            RiskLevel::Medium => "Medio",
            RiskLevel::High => "Alto",
            RiskLevel::VeryHigh => "Muy Alto",
        }
    }

    /// `Alto` and `Muy Alto` count towards the high-risk metric.
    pub fn is_high(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::VeryHigh)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single student (one row of the source CSV). Columns the dashboard does not
/// interpret are carried through untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentRecord {
    pub cells: BTreeMap<String, CellValue>,
}

impl StudentRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Raw `Nivel_Riesgo` label, if the column holds text.
    pub fn risk_label(&self) -> Option<&str> {
        self.get(COL_RISK_LEVEL).and_then(CellValue::as_str)
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_label().and_then(RiskLevel::from_label)
    }

    pub fn motivation(&self) -> Option<f64> {
        self.get(COL_MOTIVATION).and_then(CellValue::as_f64)
    }

    pub fn nem_score(&self) -> Option<f64> {
        self.get(COL_NEM).and_then(CellValue::as_f64)
    }

    pub fn academic_confidence(&self) -> Option<f64> {
        self.get(COL_CONFIDENCE).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// StudentDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct StudentDataset {
    pub records: Vec<StudentRecord>,
    /// Column names in header order.
    pub column_names: Vec<String>,
}

impl StudentDataset {
    pub fn new(column_names: Vec<String>, records: Vec<StudentRecord>) -> Self {
        StudentDataset {
            records,
            column_names,
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// First column (in header order) whose lowercase name contains `duracion`.
pub fn find_duration_column(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .find(|c| c.to_lowercase().contains(DURATION_MARKER))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_guesses_cell_types() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("13072"), CellValue::Integer(13072));
        assert_eq!(CellValue::parse("9.5"), CellValue::Float(9.5));
        assert_eq!(CellValue::parse("NaN"), CellValue::Null);
        assert_eq!(CellValue::parse("true"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("Alto"), CellValue::String("Alto".into()));
    }

    #[test]
    fn parse_keeps_text_verbatim_but_trims_numbers() {
        assert_eq!(CellValue::parse(" 5"), CellValue::Integer(5));
        assert_eq!(CellValue::parse("6.5 "), CellValue::Float(6.5));
        assert_eq!(CellValue::parse("Alto "), CellValue::String("Alto ".into()));
        assert_eq!(CellValue::parse(" "), CellValue::String(" ".into()));
    }

    #[test]
    fn risk_labels_are_exact() {
        assert_eq!(RiskLevel::from_label("Muy Alto"), Some(RiskLevel::VeryHigh));
        assert_eq!(RiskLevel::from_label("alto"), None);
        assert!(RiskLevel::High.is_high());
        assert!(!RiskLevel::Medium.is_high());
    }

    #[test]
    fn duration_column_is_first_case_insensitive_match() {
        let cols: Vec<String> = ["NEM", "Duracion_Real", "duracion_teorica"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_duration_column(&cols), Some("Duracion_Real"));
        assert_eq!(find_duration_column(&cols[..1]), None);
    }
}
