// src/cli/handlers/mod.rs

// One module per task in the dispatcher registry.

pub mod build;
pub mod commons;
pub mod lint;
pub mod list;
