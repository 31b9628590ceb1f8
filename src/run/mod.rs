//! Runs: one execution of a requirements document.
//!
//! A run binds a document to an execution environment and a source-control
//! branch, iterates against the stories, and drives the review workflow.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Coordination services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
