//! Execution backend adapter: isolated environments for agent work.
//!
//! A uniform contract over heterogeneous container engines. Each backend is
//! an external binary; the adapters translate the common contract into
//! engine-specific invocations and normalize the engines' status and JSON
//! vocabularies back into one model. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Engine selection in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
