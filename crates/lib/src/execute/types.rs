//! Types for running external processes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised before a process produced an exit status.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The program could not be started (not found, not executable, bad cwd).
  #[error("failed to spawn '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },
}

/// A shell command string to run in an explicit working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
  pub command: String,
  pub cwd: PathBuf,
  /// Variables merged over the inherited environment.
  pub env: Option<BTreeMap<String, String>>,
}

impl ShellInvocation {
  pub fn new(command: &str, cwd: &Path) -> Self {
    Self {
      command: command.to_string(),
      cwd: cwd.to_path_buf(),
      env: None,
    }
  }

  pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
    self.env = Some(env);
    self
  }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, `None` when the process was terminated by a signal.
  pub status: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.status == Some(0)
  }
}

/// Blocking process execution.
///
/// Every call runs to completion before returning; there is no cancellation.
/// Implemented by [`SystemRunner`](super::SystemRunner) for real processes and
/// by test fakes that record invocations instead of spawning anything.
pub trait CommandRunner {
  /// Run a command string through the shell.
  fn run_shell(&self, invocation: &ShellInvocation) -> Result<CommandOutput, ProcessError>;

  /// Run a program directly with arguments, inheriting the environment.
  fn run_program(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, ProcessError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
  fn run_shell(&self, invocation: &ShellInvocation) -> Result<CommandOutput, ProcessError> {
    (**self).run_shell(invocation)
  }

  fn run_program(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, ProcessError> {
    (**self).run_program(program, args, cwd)
  }
}
