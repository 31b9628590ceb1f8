//! Orchestration services for environment reclaim.

mod sweeper;

pub use sweeper::{DEFAULT_SWEEP_CADENCE, GcService};
