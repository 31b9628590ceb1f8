//! Adapter implementations of the provider contract.
//!
//! One adapter per hosting provider, each with pure boundary-mapping
//! functions so provider quirks never leak into shared logic.

pub(crate) mod github;
pub(crate) mod gitlab;
mod http;

pub use github::GithubProvider;
pub use gitlab::GitlabProvider;
