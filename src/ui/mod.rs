/// Rendering only: every widget reads from or writes to `AppState`.

pub mod login;
pub mod panels;
pub mod plot;
pub mod table;
