//! Port contracts for execution backends.

mod container_engine;

pub use container_engine::{ContainerEngine, EngineKind};
