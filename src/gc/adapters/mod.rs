//! Adapter implementations of the reclaim ports.

mod archive;

pub use archive::{InMemoryArchiveStore, LogOnlyArchiveStore};
