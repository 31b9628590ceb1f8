//! Product requirements documents: the task model agents work against.
//!
//! A document decomposes a coding task into user stories with acceptance
//! criteria and attempt tracking. This module carries the template catalog,
//! construction and validation, markdown import/export, branch-name
//! generation, and derived progress aggregation. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Construction/catalog/markdown services in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
