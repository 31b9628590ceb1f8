//! Source-control provider adapter: branches, pull requests, and CI.
//!
//! A uniform contract over hosting providers' REST APIs. Every externally
//! visible entity is returned in a provider-agnostic shape; the adapters
//! translate provider-specific response fields at the boundary. No retry
//! happens here — retry policy belongs to the caller. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
