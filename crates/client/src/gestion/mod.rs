//! Gestión tracking: one editable record per (company, task)

pub mod board;
pub mod record;

pub use board::{GestionBoard, SaveOutcome};
pub use record::{GestionField, GestionRecord, GestionStatus};
