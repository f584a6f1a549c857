// src/core/plans.rs

//! The fixed step sequences behind `op build` and `op lint`.

use crate::{core::config_loader::OpsConfig, models::Step};

pub const BUN_INSTALL: &str = "bun install";
pub const BUN_RUN_BUILD: &str = "bun run build";
pub const GOLANGCI_LINT: &str = "golangci-lint";
pub const GO_FMT: &str = "go fmt";
pub const PRETTIER: &str = "prettier";

/// Installs the JS dependencies, then bundles. Both steps run at the project root.
pub fn build_plan(config: &OpsConfig) -> Vec<Step> {
    let bun = &config.tools.bun;
    vec![
        Step::new(BUN_INSTALL, bun).args(["install"]),
        Step::new(BUN_RUN_BUILD, bun).args(["run", "build"]),
    ]
}

/// Lints and formats the task sources inside `ops_dir`, then installs the JS
/// dependencies and checks their formatting at the project root.
pub fn lint_plan(config: &OpsConfig) -> Vec<Step> {
    let tools = &config.tools;
    let go_shell = [tools.golangci_lint.as_str(), tools.go.as_str()];
    vec![
        Step::new(GOLANGCI_LINT, &tools.golangci_lint)
            .args(["run"])
            .shell(go_shell)
            .dir(&config.ops_dir),
        Step::new(GO_FMT, &tools.go)
            .args(["fmt"])
            .shell(go_shell)
            .dir(&config.ops_dir),
        Step::new(BUN_INSTALL, &tools.bun).args(["install"]),
        Step::new(PRETTIER, &tools.bunx).args(["prettier", "--check", config.prettier_glob.as_str()]),
    ]
}
