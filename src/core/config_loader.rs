//! # Config Loader
//!
//! Finds and parses `ops.toml`. The first file found wins, in this order:
//! an explicit path (`--config` / `OPS_CONFIG`), the project root, the user
//! config directory. Without any file the built-in defaults apply, which
//! reproduce the standard tool names, `.ops` and the prettier glob.
//!
//! Path-like values go through `shellexpand`, so `~` and `$VAR` work in
//! `ops_dir` and in tool overrides.
use crate::{
    constants::{OPS_DIR, PRETTIER_GLOB, PROJECT_CONFIG_FILENAME},
    core::paths,
};
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Could not expand '{value}' in '{path}'")]
    Expand {
        path: String,
        value: String,
        #[source]
        source: shellexpand::LookupError<std::env::VarError>,
    },
}

/// Executables used by the tasks. Step names stay the same whatever these are.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ToolsConfig {
    pub bun: String,
    pub bunx: String,
    pub go: String,
    pub golangci_lint: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            bun: "bun".to_string(),
            bunx: "bunx".to_string(),
            go: "go".to_string(),
            golangci_lint: "golangci-lint".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OpsConfig {
    /// Working directory of the Go lint and format steps, relative to the root.
    pub ops_dir: PathBuf,
    pub prettier_glob: String,
    /// Do not echo each command before running it.
    pub quiet: bool,
    pub tools: ToolsConfig,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            ops_dir: PathBuf::from(OPS_DIR),
            prettier_glob: PRETTIER_GLOB.to_string(),
            quiet: false,
            tools: ToolsConfig::default(),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::User(path) => {
                write!(f, "{}", path.display())
            }
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: OpsConfig,
    pub source: ConfigSource,
}

/// Loads the configuration for the project at `root`.
///
/// An explicit file must exist; the project and user files are optional.
pub fn load(explicit: Option<&Path>, root: &Path) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            config: load_file(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    let project_file = root.join(PROJECT_CONFIG_FILENAME);
    if project_file.is_file() {
        return Ok(LoadedConfig {
            config: load_file(&project_file)?,
            source: ConfigSource::Project(project_file),
        });
    }

    if let Some(user_file) = paths::user_config_path().filter(|path| path.is_file()) {
        return Ok(LoadedConfig {
            config: load_file(&user_file)?,
            source: ConfigSource::User(user_file),
        });
    }

    log::debug!("No {} found, using defaults.", PROJECT_CONFIG_FILENAME);
    Ok(LoadedConfig {
        config: OpsConfig::default(),
        source: ConfigSource::Defaults,
    })
}

fn load_file(path: &Path) -> Result<OpsConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content, path)
}

/// Parses `content` (read from `path`, used in error messages) and expands its paths.
pub fn parse(content: &str, path: &Path) -> Result<OpsConfig, ConfigError> {
    let mut config: OpsConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    config.ops_dir = PathBuf::from(expand(config.ops_dir.to_string_lossy().as_ref(), path)?);
    let tools = &mut config.tools;
    for value in [&mut tools.bun, &mut tools.bunx, &mut tools.go, &mut tools.golangci_lint] {
        *value = expand(value, path)?;
    }

    Ok(config)
}

fn expand(value: &str, path: &Path) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| ConfigError::Expand {
            path: path.display().to_string(),
            value: value.to_string(),
            source: e,
        })
}
