use crate::error::MonitorError;

use super::model::{CellValue, StudentDataset, COL_CAREER_ID, COL_CAREER_NAME, COL_DISPLAY_NAME};

// ---------------------------------------------------------------------------
// Career catalog
// ---------------------------------------------------------------------------

/// Known career identifiers and their display names.
pub const CAREER_CATALOG: [(i64, &str); 6] = [
    (13072, "Ing. Civil Industrial"),
    (13069, "Ing. Civil"),
    (13070, "Ing. Civil Eléctrica"),
    (13071, "Ing. Civil Electrónica"),
    (13019, "Ing. Comercial"),
    (13073, "Ing. Civil Informática"),
];

pub fn catalog_name(id: i64) -> Option<&'static str> {
    CAREER_CATALOG
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}

/// Coerce a `Carrera_ID` cell to a number; anything non-numeric is missing.
fn coerce_numeric(value: &CellValue) -> CellValue {
    match value {
        CellValue::Integer(_) | CellValue::Float(_) => value.clone(),
        _ => CellValue::Null,
    }
}

/// Display name for a coerced id: catalog lookup, else the id as text.
/// Integral floats are printed without a fractional part; missing ids print `nan`.
pub fn display_name(id: &CellValue) -> String {
    let integral = match id {
        CellValue::Integer(i) => Some(*i),
        CellValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
        _ => None,
    };
    match integral {
        Some(i) => catalog_name(i)
            .map(str::to_string)
            .unwrap_or_else(|| i.to_string()),
        None => id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// A dataset whose career display column is known.
#[derive(Debug, Clone)]
pub struct ResolvedDataset {
    pub dataset: StudentDataset,
    /// Column holding the display name (`Nombre_Visual` or `Nombre_Carrera`).
    pub career_column: String,
}

/// Attach a career display name to every row.
///
/// `Carrera_ID` wins over `Nombre_Carrera`. Without either column there is no
/// cohort to offer and [`MonitorError::MissingCareerColumn`] is returned.
pub fn resolve(mut dataset: StudentDataset) -> Result<ResolvedDataset, MonitorError> {
    if dataset.has_column(COL_CAREER_ID) {
        for record in &mut dataset.records {
            let id = record
                .get(COL_CAREER_ID)
                .map(coerce_numeric)
                .unwrap_or(CellValue::Null);
            let name = display_name(&id);
            record.cells.insert(COL_CAREER_ID.to_string(), id);
            record
                .cells
                .insert(COL_DISPLAY_NAME.to_string(), CellValue::String(name));
        }
        if !dataset.has_column(COL_DISPLAY_NAME) {
            dataset.column_names.push(COL_DISPLAY_NAME.to_string());
        }
        log::debug!("Resolved career names from {COL_CAREER_ID}");
        return Ok(ResolvedDataset {
            dataset,
            career_column: COL_DISPLAY_NAME.to_string(),
        });
    }

    if dataset.has_column(COL_CAREER_NAME) {
        log::debug!("Using {COL_CAREER_NAME} as career display name");
        return Ok(ResolvedDataset {
            dataset,
            career_column: COL_CAREER_NAME.to_string(),
        });
    }

    log::error!(
        "Dataset has neither {COL_CAREER_ID} nor {COL_CAREER_NAME}: {:?}",
        dataset.column_names
    );
    Err(MonitorError::MissingCareerColumn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn dataset(csv: &str) -> StudentDataset {
        read_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn catalog_ids_resolve_to_names() {
        let ds = dataset("Carrera_ID\n13072\n13019\n");
        let resolved = resolve(ds).unwrap();
        assert_eq!(resolved.career_column, COL_DISPLAY_NAME);
        let names: Vec<String> = resolved
            .dataset
            .records
            .iter()
            .map(|r| r.get(COL_DISPLAY_NAME).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ing. Civil Industrial", "Ing. Comercial"]);
    }

    #[test]
    fn unknown_and_missing_ids_fall_back_to_text() {
        let ds = dataset("Carrera_ID\n99999\n13070.0\nabc\n\"\"\n");
        let resolved = resolve(ds).unwrap();
        let names: Vec<String> = resolved
            .dataset
            .records
            .iter()
            .map(|r| r.get(COL_DISPLAY_NAME).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["99999", "Ing. Civil Eléctrica", "nan", "nan"]);
        assert!(names.iter().all(|n| !n.is_empty()));
        assert_eq!(
            resolved.dataset.records[2].get(COL_CAREER_ID),
            Some(&CellValue::Null)
        );
    }

    #[test]
    fn name_column_is_used_verbatim() {
        let ds = dataset("Nombre_Carrera,NEM\nGeología,600\n");
        let resolved = resolve(ds).unwrap();
        assert_eq!(resolved.career_column, COL_CAREER_NAME);
        assert!(!resolved.dataset.has_column(COL_DISPLAY_NAME));
    }

    #[test]
    fn no_career_column_is_a_schema_error() {
        let ds = dataset("NEM,Nivel_Riesgo\n600,Alto\n");
        assert!(matches!(resolve(ds), Err(MonitorError::MissingCareerColumn)));
    }

    #[test]
    fn resolve_is_idempotent() {
        let ds = dataset("Carrera_ID\n13072\n13099\nxyz\n");
        let once = resolve(ds).unwrap();
        let twice = resolve(once.dataset.clone()).unwrap();
        assert_eq!(once.dataset.column_names, twice.dataset.column_names);
        for (a, b) in once.dataset.records.iter().zip(&twice.dataset.records) {
            assert_eq!(a.get(COL_DISPLAY_NAME), b.get(COL_DISPLAY_NAME));
        }
    }
}
