// src/system/executor.rs

use crate::{CancellationToken, is_cancelled, models::Invocation};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;

/// How often a running child is polled for exit and for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[cfg(unix)]
const SIGINT: i32 = 2;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("'{program}' is not available in this shell (allowed: {allowed})")]
    NotAllowed { program: String, allowed: String },
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed")]
    CommandFailed(String, #[source] std::io::Error),
    #[error("Command '{command}' exited with {}", describe_exit(.code))]
    NonZeroExitStatus { command: String, code: Option<i32> },
    #[error("Operation was cancelled by the user.")]
    Cancelled,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by a signal)".to_string(),
    }
}

/// Runs one external process to completion.
///
/// Implementations must return `Ok(())` only when the process exited with
/// status 0, and should give up with [`ExecutionError::Cancelled`] once
/// `token` is set.
pub trait CommandRunner: Send + Sync + fmt::Debug {
    fn run(&self, invocation: &Invocation, token: &CancellationToken) -> Result<(), ExecutionError>;
}

/// Spawns real processes with inherited stdio, so the tools' own diagnostics
/// reach the user untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, token: &CancellationToken) -> Result<(), ExecutionError> {
        let command_line = invocation.command_line();
        let clean_cwd = dunce::simplified(&invocation.cwd);

        let mut command = StdCommand::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(clean_cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Windows builtins and `.cmd` shims (bunx.cmd) are only reachable through `cmd /C`.
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
                log::debug!("'{}' not found. Retrying with cmd /C.", invocation.program);
                StdCommand::new("cmd")
                    .arg("/C")
                    .arg(&invocation.program)
                    .args(&invocation.args)
                    .current_dir(clean_cwd)
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .spawn()
                    .map_err(|e| ExecutionError::CommandFailed(command_line.clone(), e))?
            }
            Err(e) => return Err(ExecutionError::CommandFailed(command_line, e)),
        };

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return check_status(status, command_line, token),
                Ok(None) => {
                    if is_cancelled(token) {
                        log::debug!(
                            "Cancellation requested, killing child process (PID: {})...",
                            child.id()
                        );
                        if let Err(e) = child.kill() {
                            log::warn!("Failed to kill child process {}: {}", child.id(), e);
                        }
                        child.wait().ok();
                        return Err(ExecutionError::Cancelled);
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(ExecutionError::CommandFailed(command_line, e)),
            }
        }
    }
}

fn check_status(
    status: ExitStatus,
    command_line: String,
    token: &CancellationToken,
) -> Result<(), ExecutionError> {
    if status.success() {
        return Ok(());
    }
    // Ctrl+C reaches the child too; it usually dies before we notice the flag.
    if is_cancelled(token) || killed_by_interrupt(&status) {
        return Err(ExecutionError::Cancelled);
    }
    Err(ExecutionError::NonZeroExitStatus {
        command: command_line,
        code: status.code(),
    })
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

/// A shell execution context: the set of programs it may run, the working
/// directory they run in, and the cancellation scope they run under.
#[derive(Debug)]
pub struct ShellContext<'a> {
    runner: &'a dyn CommandRunner,
    allowed: Vec<String>,
    cwd: PathBuf,
    token: &'a CancellationToken,
}

impl<'a> ShellContext<'a> {
    /// Creates a shell that may only run `programs`, in the current directory.
    pub fn new<I, S>(runner: &'a dyn CommandRunner, programs: I, token: &'a CancellationToken) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runner,
            allowed: programs.into_iter().map(Into::into).collect(),
            cwd: PathBuf::from("."),
            token,
        }
    }

    /// Overrides the working directory for every command run by this shell.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = dir.into();
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Runs `program` with `args` and waits for it to exit.
    pub fn exec(&self, program: &str, args: &[String]) -> Result<(), ExecutionError> {
        if program.trim().is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }
        if !self.allowed.iter().any(|allowed| allowed == program) {
            return Err(ExecutionError::NotAllowed {
                program: program.to_string(),
                allowed: self.allowed.join(", "),
            });
        }
        if is_cancelled(self.token) {
            return Err(ExecutionError::Cancelled);
        }

        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: dunce::simplified(&self.cwd).to_path_buf(),
        };
        log::debug!("exec `{}` in '{}'", invocation, invocation.cwd.display());
        self.runner.run(&invocation, self.token)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockRunner;
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn token() -> CancellationToken {
        Arc::new(AtomicBool::new(false))
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_exec_runs_in_the_shell_directory() {
        let runner = MockRunner::succeeding();
        let token = token();
        let shell = ShellContext::new(&runner, ["go"], &token).with_dir("/work/.ops");

        shell.exec("go", &args(&["fmt"])).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "go");
        assert_eq!(calls[0].args, args(&["fmt"]));
        assert_eq!(calls[0].cwd, PathBuf::from("/work/.ops"));
    }

    #[test]
    fn test_exec_refuses_undeclared_programs() {
        let runner = MockRunner::succeeding();
        let token = token();
        let shell = ShellContext::new(&runner, ["bun"], &token);

        let err = shell.exec("go", &args(&["fmt"])).unwrap_err();

        assert!(matches!(err, ExecutionError::NotAllowed { ref program, .. } if program == "go"));
        assert!(err.to_string().contains("allowed: bun"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_exec_rejects_empty_program() {
        let runner = MockRunner::succeeding();
        let token = token();
        let shell = ShellContext::new(&runner, [""], &token);

        assert!(matches!(shell.exec("  ", &[]), Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn test_exec_does_not_spawn_once_cancelled() {
        let runner = MockRunner::succeeding();
        let token = token();
        token.store(true, Ordering::SeqCst);
        let shell = ShellContext::new(&runner, ["bun"], &token);

        let result = shell.exec("bun", &args(&["install"]));

        assert!(matches!(result, Err(ExecutionError::Cancelled)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_non_zero_exit_message_names_command_and_status() {
        let runner = MockRunner::failing_on("bun", &["run", "build"]);
        let token = token();
        let shell = ShellContext::new(&runner, ["bun"], &token);

        let err = shell.exec("bun", &args(&["run", "build"])).unwrap_err();

        assert_eq!(err.to_string(), "Command 'bun run build' exited with status 1");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_status() {
        let token = token();
        let ok = Invocation {
            program: "true".to_string(),
            args: Vec::new(),
            cwd: PathBuf::from("."),
        };
        let failing = Invocation {
            program: "false".to_string(),
            ..ok.clone()
        };

        assert!(SystemRunner.run(&ok, &token).is_ok());
        assert!(matches!(
            SystemRunner.run(&failing, &token),
            Err(ExecutionError::NonZeroExitStatus { code: Some(1), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_kills_running_child_on_cancellation() {
        let token = token();
        let sleeper = Invocation {
            program: "sleep".to_string(),
            args: args(&["10"]),
            cwd: PathBuf::from("."),
        };
        let canceller = {
            let token = Arc::clone(&token);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(200));
                token.store(true, Ordering::SeqCst);
            })
        };

        let started = std::time::Instant::now();
        let result = SystemRunner.run(&sleeper, &token);
        canceller.join().unwrap();

        assert!(matches!(result, Err(ExecutionError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_after_cancellation_is_reported_as_cancelled() {
        use std::os::unix::process::ExitStatusExt;
        let token = token();
        token.store(true, Ordering::SeqCst);

        // Raw wait status 256 is a normal exit with code 1.
        let result = check_status(ExitStatus::from_raw(256), "bun install".to_string(), &token);

        assert!(matches!(result, Err(ExecutionError::Cancelled)));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_killed_by_sigint_is_reported_as_cancelled() {
        use std::os::unix::process::ExitStatusExt;
        let token = token();

        let result = check_status(ExitStatus::from_raw(SIGINT), "bun install".to_string(), &token);

        assert!(matches!(result, Err(ExecutionError::Cancelled)));
        assert!(!is_cancelled(&token));
    }

    #[cfg(unix)]
    #[test]
    fn test_plain_failure_keeps_its_exit_code() {
        use std::os::unix::process::ExitStatusExt;
        let token = token();

        let result = check_status(ExitStatus::from_raw(256), "go fmt".to_string(), &token);

        assert!(matches!(
            result,
            Err(ExecutionError::NonZeroExitStatus { code: Some(1), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_missing_program() {
        let token = token();
        let missing = Invocation {
            program: "ops-test-no-such-program".to_string(),
            args: Vec::new(),
            cwd: PathBuf::from("."),
        };

        let err = SystemRunner.run(&missing, &token).unwrap_err();

        assert!(matches!(err, ExecutionError::CommandFailed(ref cmd, _) if cmd == "ops-test-no-such-program"));
    }
}
