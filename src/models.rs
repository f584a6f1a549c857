// src/models.rs

use std::fmt;
use std::path::PathBuf;

/// One external process to run: what the shell layer spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// The invocation as a shell-quoted command line, for display and error messages.
    pub fn command_line(&self) -> String {
        quote_command(&self.program, &self.args)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// A single step of a task.
///
/// Each step runs in its own shell execution context: `shell` lists the
/// programs that context may run, and `dir` overrides the working directory
/// (relative paths are resolved against the project root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Name used to identify the step when it fails (e.g. `bun install`).
    pub label: String,
    pub shell: Vec<String>,
    pub dir: Option<PathBuf>,
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    /// Creates a step whose shell only allows `program`.
    pub fn new(label: impl Into<String>, program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            label: label.into(),
            shell: vec![program.clone()],
            dir: None,
            program,
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the programs the step's shell is allowed to run.
    pub fn shell<I, S>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shell = programs.into_iter().map(Into::into).collect();
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn command_line(&self) -> String {
        quote_command(&self.program, &self.args)
    }
}

fn quote_command(program: &str, args: &[String]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(String::as_str));
    // Words with NUL bytes can't be quoted; show them raw.
    shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
}
