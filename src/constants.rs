// src/constants.rs

/// The name of the project configuration file (at the project root).
pub const PROJECT_CONFIG_FILENAME: &str = "ops.toml";

/// The directory holding the task runner's own sources, relative to the project root.
pub const OPS_DIR: &str = ".ops";

/// The JS manifest, used as a project root marker.
pub const PACKAGE_MANIFEST_FILENAME: &str = "package.json";

/// The sub-directory of the user config dir that may hold a fallback `ops.toml`.
pub const USER_CONFIG_DIRNAME: &str = "ops";

/// Files checked by the formatting step.
pub const PRETTIER_GLOB: &str = "./**/*.{js,jsx,mjs,cjs,ts,tsx,json,vue}";

/// Exit status used when a run is interrupted, as shells do for SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;
