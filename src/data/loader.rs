use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{CellValue, StudentDataset, StudentRecord};

// ---------------------------------------------------------------------------
// Load outcome
// ---------------------------------------------------------------------------

/// Result of a load attempt as kept by [`DatasetCache`].
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(StudentDataset),
    /// The CSV file does not exist. Downstream stages degrade to empty values.
    Absent { path: PathBuf },
    /// The file exists but could not be read or parsed.
    Failed { message: String },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the student CSV at `path`.
///
/// A missing file yields [`LoadOutcome::Absent`]. Every other failure
/// (permissions, ragged rows, invalid UTF-8) is returned as an error.
pub fn load_csv(path: &Path) -> Result<LoadOutcome> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Student CSV not found at {}", path.display());
            return Ok(LoadOutcome::Absent {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("opening CSV {}", path.display()));
        }
    };

    let dataset = read_csv(file).with_context(|| format!("reading {}", path.display()))?;
    log::info!(
        "Loaded {} students with columns {:?}",
        dataset.len(),
        dataset.column_names
    );
    Ok(LoadOutcome::Loaded(dataset))
}

/// Parse CSV content from any reader. The header row gives the column names.
pub fn read_csv<R: Read>(reader: R) -> Result<StudentDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV data row {}", row_no + 1))?;

        let cells: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), CellValue::parse(value)))
            .collect();

        records.push(StudentRecord { cells });
    }

    Ok(StudentDataset::new(headers, records))
}

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Memoizes the load of one CSV path.
///
/// Invalidation policy: the file is read at most once per process. The cached
/// outcome (including [`LoadOutcome::Absent`] and [`LoadOutcome::Failed`]) is
/// kept until [`reload`] is called or the path is changed with [`set_path`].
/// Edits to the file on disk are not observed otherwise.
///
/// [`reload`]: DatasetCache::reload
/// [`set_path`]: DatasetCache::set_path
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    slot: Option<LoadOutcome>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            slot: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.is_some()
    }

    /// Return the cached outcome, reading the file on first use.
    /// A fatal load error is logged once and memoized as [`LoadOutcome::Failed`].
    pub fn get(&mut self) -> &LoadOutcome {
        let path = &self.path;
        self.slot.get_or_insert_with(|| {
            load_csv(path).unwrap_or_else(|e| {
                log::error!("Failed to load student data: {e:#}");
                LoadOutcome::Failed {
                    message: format!("{e:#}"),
                }
            })
        })
    }

    /// Drop the cached outcome and read the file again.
    pub fn reload(&mut self) -> &LoadOutcome {
        log::info!("Reloading {}", self.path.display());
        self.slot = None;
        self.get()
    }

    /// Point the cache at another file. The next [`get`](Self::get) reads it.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn row_count(outcome: &LoadOutcome) -> Option<usize> {
        match outcome {
            LoadOutcome::Loaded(ds) => Some(ds.len()),
            LoadOutcome::Absent { .. } | LoadOutcome::Failed { .. } => None,
        }
    }

    const SAMPLE: &str = "Carrera_ID,Nivel_Riesgo,Motivacion_Actual,NEM,Duracion_Real\n\
                          13072,Alto,3,610.5,11\n\
                          13069,Bajo,6,702,\n";

    #[test]
    fn read_csv_keeps_header_order_and_types() {
        let ds = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            ds.column_names,
            vec!["Carrera_ID", "Nivel_Riesgo", "Motivacion_Actual", "NEM", "Duracion_Real"]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].nem_score(), Some(610.5));
        assert_eq!(ds.records[0].risk_label(), Some("Alto"));
        assert_eq!(ds.records[1].get("Duracion_Real"), Some(&CellValue::Null));
    }

    #[test]
    fn ragged_rows_are_fatal() {
        let bad = "a,b\n1,2\n3\n";
        let err = read_csv(bad.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").starts_with("CSV data row 2"));
    }

    #[test]
    fn cells_keep_surrounding_spaces() {
        let ds = read_csv("Nivel_Riesgo, NEM\nAlto , 610\n".as_bytes()).unwrap();
        assert_eq!(ds.column_names, vec!["Nivel_Riesgo", " NEM"]);
        assert_eq!(ds.records[0].risk_label(), Some("Alto "));
        assert_eq!(ds.records[0].risk_level(), None);
        assert_eq!(ds.records[0].get(" NEM"), Some(&CellValue::Integer(610)));
    }

    #[test]
    fn cache_memoizes_fatal_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "a,b\n1,2\n3\n").unwrap();

        let mut cache = DatasetCache::new(&path);
        assert!(matches!(cache.get(), LoadOutcome::Failed { .. }));
        assert!(cache.is_loaded());

        std::fs::write(&path, SAMPLE).unwrap();
        assert!(matches!(cache.get(), LoadOutcome::Failed { .. }));
        assert_eq!(row_count(cache.reload()), Some(2));
    }

    #[test]
    fn missing_file_is_absent_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base_app_unificada.csv");
        match load_csv(&path).unwrap() {
            LoadOutcome::Absent { path: p } => assert_eq!(p, path),
            other => panic!("expected Absent, got {other:?}"),
        }
    }

    #[test]
    fn cache_loads_once_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut cache = DatasetCache::new(&path);
        assert!(!cache.is_loaded());
        assert_eq!(row_count(cache.get()), Some(2));

        // Append a row: the cached copy stays stale until reload.
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(f, "13073,Medio,5,650,10").unwrap();
        assert_eq!(row_count(cache.get()), Some(2));
        assert_eq!(row_count(cache.reload()), Some(3));
    }

    #[test]
    fn cache_memoizes_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let mut cache = DatasetCache::new(&path);
        assert_eq!(row_count(cache.get()), None);

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(row_count(cache.get()), None);

        cache.set_path(&path);
        assert_eq!(row_count(cache.get()), Some(2));
    }
}
