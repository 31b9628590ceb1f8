//! Orchestration services for execution backends.

mod selection;

pub use selection::{EngineChoice, EngineSelectionError, first_available, select_engine};
