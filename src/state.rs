use std::path::PathBuf;

use crate::config::AppConfig;
use crate::data::career::{resolve, ResolvedDataset};
use crate::data::filter::{career_options, filter_cohort, Cohort};
use crate::data::loader::{DatasetCache, LoadOutcome};
use crate::data::metrics::{aggregate, Metrics};
use crate::diagnosis::{assess, Assessment, SimulationInput};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Rejection message from the last attempt.
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Login status of this window.
    pub session: Session,
    pub login: LoginForm,

    /// Memoized CSV load.
    pub cache: DatasetCache,

    /// Resolved dataset (None when absent, unusable or not loaded yet).
    pub dataset: Option<ResolvedDataset>,

    /// Sorted career names offered in the selector.
    pub careers: Vec<String>,
    pub selected_career: Option<String>,

    /// Indices of students in the selected cohort (cached).
    pub cohort_indices: Vec<usize>,

    /// Metrics of the current cohort.
    pub metrics: Metrics,

    /// Simulated student entered in the side panel.
    pub simulation: SimulationInput,

    /// Error shown in place of the data (missing file, bad schema, broken CSV).
    pub data_error: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let cache = DatasetCache::new(config.data_path.clone());
        Self {
            config,
            session: Session::default(),
            login: LoginForm::default(),
            cache,
            dataset: None,
            careers: Vec::new(),
            selected_career: None,
            cohort_indices: Vec::new(),
            metrics: Metrics::default(),
            simulation: SimulationInput::default(),
            data_error: None,
        }
    }

    // ---- Session ----

    /// Check the login form against the configured credentials.
    pub fn submit_login(&mut self) {
        let attempt = self.session.clone().login(
            &self.config.credentials,
            &self.login.username,
            &self.login.password,
        );
        match attempt {
            Ok(session) => {
                self.session = session;
                self.login = LoginForm::default();
            }
            Err(e) => {
                self.login.password.clear();
                self.login.error = Some(e.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        self.session = std::mem::take(&mut self.session).logout();
    }

    // ---- Data ----

    /// Load the dataset on first use; later calls hit the cache.
    pub fn ensure_loaded(&mut self) {
        if !self.cache.is_loaded() {
            let outcome = self.cache.get().clone();
            self.ingest(outcome);
        }
    }

    /// Explicit reload command: re-read the current CSV from disk.
    pub fn reload(&mut self) {
        let outcome = self.cache.reload().clone();
        self.ingest(outcome);
    }

    /// Switch to another CSV file (File → Open…).
    pub fn open_file(&mut self, path: PathBuf) {
        self.cache.set_path(path);
        let outcome = self.cache.get().clone();
        self.ingest(outcome);
    }

    /// Replace the dataset with a fresh load outcome. The selected career
    /// survives when the new data still offers it.
    fn ingest(&mut self, outcome: LoadOutcome) {
        let previous = self.selected_career.take();
        self.clear_dataset();
        match outcome {
            LoadOutcome::Loaded(dataset) => match resolve(dataset) {
                Ok(resolved) => self.set_dataset(resolved, previous),
                Err(e) => self.data_error = Some(e.to_string()),
            },
            LoadOutcome::Absent { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.data_error = Some(format!("Error: Falta '{name}'"));
            }
            LoadOutcome::Failed { message } => {
                self.data_error = Some(format!("Error: {message}"));
            }
        }
    }

    fn clear_dataset(&mut self) {
        self.dataset = None;
        self.careers.clear();
        self.selected_career = None;
        self.data_error = None;
        self.refilter();
    }

    /// Install a resolved dataset, selecting `preferred` when offered and the
    /// first career otherwise.
    fn set_dataset(&mut self, resolved: ResolvedDataset, preferred: Option<String>) {
        if resolved.dataset.is_empty() {
            log::warn!("Student CSV has a header but no rows");
        }
        self.careers = career_options(Some(&resolved));
        self.selected_career = match preferred {
            Some(name) if self.careers.contains(&name) => Some(name),
            _ => self.careers.first().cloned(),
        };
        self.dataset = Some(resolved);
        self.data_error = None;
        self.refilter();
    }

    pub fn select_career(&mut self, name: String) {
        self.selected_career = Some(name);
        self.refilter();
    }

    /// Recompute the cohort and its metrics after a selection or data change.
    pub fn refilter(&mut self) {
        let cohort = match &self.selected_career {
            Some(sel) => filter_cohort(self.dataset.as_ref(), sel),
            None => Cohort::empty(),
        };
        self.metrics = aggregate(&cohort);
        self.cohort_indices = cohort.indices;
    }

    pub fn cohort(&self) -> Cohort<'_> {
        match &self.dataset {
            Some(ds) => Cohort::from_indices(ds, &self.cohort_indices),
            None => Cohort::empty(),
        }
    }

    // ---- Simulation ----

    pub fn set_simulation(&mut self, input: SimulationInput) {
        self.simulation = input.clamped();
    }

    pub fn assessment(&self) -> Assessment {
        assess(&self.simulation, &self.metrics)
    }
}
