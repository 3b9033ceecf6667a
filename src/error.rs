use thiserror::Error;

/// Domain errors surfaced to the operator. Fatal I/O and CSV problems travel
/// as `anyhow::Error` from the loader instead.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("No se encontró columna de carrera (se esperaba `Carrera_ID` o `Nombre_Carrera`).")]
    MissingCareerColumn,

    #[error("Usuario o contraseña incorrectos.")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
