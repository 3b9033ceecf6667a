/// Data layer: core types, loading, career resolution, filtering and statistics.
///
/// Architecture:
/// ```text
///  base_app_unificada.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → StudentDataset (memoized by DatasetCache)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  career   │  Carrera_ID → Nombre_Visual  (or Nombre_Carrera as-is)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected career → Cohort
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ metrics   │   │  series   │  chart data for the UI
///   └──────────┘   └──────────┘
/// ```

pub mod career;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod series;
