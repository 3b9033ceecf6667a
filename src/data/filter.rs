use std::collections::BTreeSet;

use super::career::ResolvedDataset;
use super::model::{find_duration_column, CellValue, StudentRecord};

// ---------------------------------------------------------------------------
// Cohort – the students of one selected career
// ---------------------------------------------------------------------------

/// Read-only view over the rows of one career. Rebuilt on every selection change.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    /// Positions of `rows` in the full dataset.
    pub indices: Vec<usize>,
    pub rows: Vec<&'a StudentRecord>,
    /// Column names of the underlying dataset, in header order.
    pub columns: &'a [String],
}

impl Cohort<'static> {
    /// The cohort of an absent or unusable dataset.
    pub fn empty() -> Self {
        Cohort {
            indices: Vec::new(),
            rows: Vec::new(),
            columns: &[],
        }
    }
}

impl<'a> Cohort<'a> {
    /// Materialise a cohort from row indices into `resolved`.
    pub fn from_indices(resolved: &'a ResolvedDataset, indices: &[usize]) -> Self {
        let records = &resolved.dataset.records;
        let (indices, rows): (Vec<usize>, Vec<&StudentRecord>) = indices
            .iter()
            .filter_map(|&i| records.get(i).map(|r| (i, r)))
            .unzip();
        Cohort {
            indices,
            rows,
            columns: &resolved.dataset.column_names,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn duration_column(&self) -> Option<&'a str> {
        find_duration_column(self.columns)
    }
}

// ---------------------------------------------------------------------------
// Career selection
// ---------------------------------------------------------------------------

/// Sorted, duplicate-free career names offered for selection.
///
/// Missing names are stringified like any other value, so they show up as `nan`.
pub fn career_options(resolved: Option<&ResolvedDataset>) -> Vec<String> {
    let Some(resolved) = resolved else {
        return Vec::new();
    };
    let column = resolved.career_column.as_str();
    resolved
        .dataset
        .records
        .iter()
        .map(|r| {
            r.get(column)
                .unwrap_or(&CellValue::Null)
                .to_string()
        })
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Indices of the rows whose display name equals `selected`.
///
/// A row passes when its career cell is present, non-null and renders exactly
/// as `selected`.
pub fn filtered_indices(resolved: &ResolvedDataset, selected: &str) -> Vec<usize> {
    let column = resolved.career_column.as_str();
    resolved
        .dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| match r.get(column) {
            Some(v) if !v.is_null() => v.to_string() == selected,
            _ => false,
        })
        .map(|(i, _)| i)
        .collect()
}

/// Narrow `resolved` to the cohort of `selected`. Absent data gives an empty cohort.
pub fn filter_cohort<'a>(resolved: Option<&'a ResolvedDataset>, selected: &str) -> Cohort<'a> {
    match resolved {
        Some(ds) => Cohort::from_indices(ds, &filtered_indices(ds, selected)),
        None => Cohort::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::career::resolve;
    use crate::data::loader::read_csv;

    fn resolved(csv: &str) -> ResolvedDataset {
        resolve(read_csv(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn options_are_sorted_and_unique() {
        let ds = resolved("Carrera_ID\n13073\n13072\n13073\n99\n13019\n13072\n");
        assert_eq!(
            career_options(Some(&ds)),
            vec![
                "99",
                "Ing. Civil Industrial",
                "Ing. Civil Informática",
                "Ing. Comercial",
            ]
        );
    }

    #[test]
    fn options_from_name_column_stringify_everything() {
        let ds = resolved("Nombre_Carrera\nGeología\n42\n\"\"\nGeología\n");
        assert_eq!(career_options(Some(&ds)), vec!["42", "Geología", "nan"]);
    }

    #[test]
    fn absent_dataset_has_no_options_and_empty_cohort() {
        assert!(career_options(None).is_empty());
        let cohort = filter_cohort(None, "Ing. Civil");
        assert!(cohort.is_empty());
        assert!(cohort.duration_column().is_none());
    }

    #[test]
    fn filter_matches_display_name() {
        let ds = resolved("Carrera_ID,NEM\n13072,600\n13069,610\n13072,620\n");
        let cohort = filter_cohort(Some(&ds), "Ing. Civil Industrial");
        let nems: Vec<f64> = cohort.rows.iter().filter_map(|r| r.nem_score()).collect();
        assert_eq!(nems, vec![600.0, 620.0]);
        assert_eq!(cohort.indices, vec![0, 2]);
        assert!(filter_cohort(Some(&ds), "Ing. Comercial").is_empty());
    }

    #[test]
    fn null_names_never_match() {
        let ds = resolved("Nombre_Carrera\n\"\"\nGeología\n");
        assert!(filtered_indices(&ds, "nan").is_empty());
    }
}
