//! Unit tests for the execution backend module.

mod memory_engine_tests;
mod selection_tests;
