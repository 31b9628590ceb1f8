//! Garbage collection engine: policy-driven environment reclaim.
//!
//! A periodic sweep lists every environment this system owns, decides
//! per-environment removal from the current policy, archives run state
//! best-effort, and enforces a capacity cap — all independent of any run's
//! foreground lifecycle. The module follows hexagonal architecture:
//!
//! - Domain types and the pure decision in [`domain`]
//! - The archive extension point in [`ports`]
//! - Shipped archive backends in [`adapters`]
//! - The sweep engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
