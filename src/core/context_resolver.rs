// src/core/context_resolver.rs

use crate::{
    CancellationToken,
    core::{
        config_loader::{self, ConfigSource, OpsConfig},
        paths,
    },
    system::executor::{CommandRunner, SystemRunner},
};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a task handler needs to run its steps.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Default working directory of every step.
    pub root: PathBuf,
    pub config: OpsConfig,
    pub config_source: ConfigSource,
    pub runner: Arc<dyn CommandRunner>,
    pub token: CancellationToken,
}

impl RunContext {
    pub fn new(
        root: impl Into<PathBuf>,
        config: OpsConfig,
        runner: Arc<dyn CommandRunner>,
        token: CancellationToken,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            config_source: ConfigSource::Defaults,
            runner,
            token,
        }
    }
}

/// Global options that shape the run context, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

/// Resolves the project root and its configuration, wiring in the real process runner.
pub fn resolve(options: &ContextOptions, token: CancellationToken) -> Result<RunContext> {
    let root = paths::resolve_project_root(options.root.as_deref())?;
    let loaded = config_loader::load(options.config.as_deref(), &root)?;
    log::debug!("Project root: {}", root.display());
    log::debug!("Configuration: {}", loaded.source);

    let mut config = loaded.config;
    config.quiet |= options.quiet;

    Ok(RunContext {
        root,
        config,
        config_source: loaded.source,
        runner: Arc::new(SystemRunner),
        token,
    })
}
