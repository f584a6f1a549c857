// src/core/mod.rs

pub mod config_loader;
pub mod context_resolver;
pub mod paths;
pub mod plans;
pub mod task_executor;
