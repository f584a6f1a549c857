//! Black-box tests of the `op` binary. Real tools are replaced through `ops.toml`
//! tool overrides, so nothing here needs bun or Go installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn op() -> Command {
    let mut cmd = Command::cargo_bin("op").unwrap();
    cmd.env_remove("OPS_ROOT")
        .env_remove("OPS_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

fn project(config: &str) -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("ops.toml"), config).unwrap();
    fs::create_dir_all(tmp.path().join(".ops")).unwrap();
    tmp
}

fn root_arg(dir: &Path) -> String {
    dir.display().to_string()
}

#[test]
fn test_version_flag() {
    op().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_tasks() {
    op().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build").and(predicate::str::contains("lint")));
}

#[test]
fn test_list_prints_every_task() {
    let tmp = project("");
    op().args(["--root", &root_arg(tmp.path()), "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("build")
                .and(predicate::str::contains("lint"))
                .and(predicate::str::contains("list")),
        );
}

#[test]
fn test_list_ignores_a_broken_config() {
    let tmp = project("bogus = 1\n");
    let root = root_arg(tmp.path());
    for args in [vec!["--root", root.as_str(), "list"], vec!["--root", root.as_str()]] {
        op().args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("build").and(predicate::str::contains("lint")));
    }
}

#[test]
fn test_list_rejects_arguments() {
    op().args(["list", "--all"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'list'"));
}

#[test]
fn test_unknown_task_fails() {
    op().arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'deploy'").and(predicate::str::contains("build, lint, list")));
}

#[test]
fn test_task_arguments_are_rejected() {
    let tmp = project("");
    op().args(["--root", &root_arg(tmp.path()), "build", "--prod"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'build'").and(predicate::str::contains("--prod")));
}

#[test]
fn test_missing_root_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing");
    op().args(["--root", &root_arg(&missing), "build"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not accessible"));
}

#[test]
fn test_invalid_config_fails() {
    let tmp = project("unknown_key = 1\n");
    op().args(["--root", &root_arg(tmp.path()), "lint"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_missing_tool_names_the_failing_step() {
    let tmp = project("[tools]\nbun = \"ops-test-no-such-bun\"\n");
    op().args(["--root", &root_arg(tmp.path()), "build"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bun install:"));
}

#[cfg(unix)]
#[test]
fn test_build_succeeds_when_every_step_succeeds() {
    let tmp = project("[tools]\nbun = \"true\"\n");
    op().args(["--root", &root_arg(tmp.path()), "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true install").and(predicate::str::contains("true run build")));
}

#[cfg(unix)]
#[test]
fn test_quiet_build_prints_nothing() {
    let tmp = project("[tools]\nbun = \"true\"\n");
    op().args(["--quiet", "--root", &root_arg(tmp.path()), "build"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_lint_stops_at_first_failing_step() {
    let config = "[tools]\ngolangci_lint = \"true\"\ngo = \"false\"\nbun = \"true\"\nbunx = \"true\"\n";
    let tmp = project(config);
    op().args(["--root", &root_arg(tmp.path()), "lint"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("false fmt").and(predicate::str::contains("true install").not()))
        .stderr(predicate::str::contains("go fmt:"));
}

#[cfg(unix)]
#[test]
fn test_lint_succeeds_when_every_step_succeeds() {
    let config = "[tools]\ngolangci_lint = \"true\"\ngo = \"true\"\nbun = \"true\"\nbunx = \"true\"\n";
    let tmp = project(config);
    op().args(["--root", &root_arg(tmp.path()), "lint"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_interrupt_stops_the_running_step_with_status_130() {
    use std::os::unix::fs::PermissionsExt;
    use std::time::{Duration, Instant};

    let tmp = tempfile::tempdir().unwrap();
    let slow_bun = tmp.path().join("slow-bun");
    fs::write(&slow_bun, "#!/bin/sh\nsleep 10\n").unwrap();
    fs::set_permissions(&slow_bun, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        tmp.path().join("ops.toml"),
        format!("[tools]\nbun = \"{}\"\n", slow_bun.display()),
    )
    .unwrap();

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("op"))
        .args(["--quiet", "--root", &root_arg(tmp.path()), "build"])
        .env_remove("OPS_ROOT")
        .env_remove("OPS_CONFIG")
        .spawn()
        .unwrap();

    // Give the interrupt listener time to install itself.
    std::thread::sleep(Duration::from_millis(500));
    let started = Instant::now();
    let killed = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(130));
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
}
