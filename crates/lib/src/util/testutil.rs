//! Test utilities for pinhash-lib.
//!
//! [`RecordingRunner`] stands in for real processes: it answers with scripted
//! outputs and remembers every invocation so tests can assert on what ran
//! and where.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::execute::{CommandOutput, CommandRunner, ProcessError, ShellInvocation};

/// A single recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
  Shell { command: String, cwd: PathBuf },
  Program { line: String, cwd: PathBuf },
}

impl Invocation {
  pub fn is_shell(&self) -> bool {
    matches!(self, Invocation::Shell { .. })
  }
}

/// Scripted [`CommandRunner`].
///
/// Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  shell_outputs: HashMap<String, CommandOutput>,
  program_outputs: HashMap<String, CommandOutput>,
  unspawnable: HashSet<String>,
  calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answer `git submodule status` with `stdout`.
  pub fn with_submodule_status(self, stdout: &str) -> Self {
    self.on_program("git submodule status", ok(stdout))
  }

  /// Answer the shell command `command` with `output`.
  pub fn on_shell(mut self, command: &str, output: CommandOutput) -> Self {
    self.shell_outputs.insert(command.to_string(), output);
    self
  }

  /// Answer the program line (program and args joined by spaces) with `output`.
  pub fn on_program(mut self, line: &str, output: CommandOutput) -> Self {
    self.program_outputs.insert(line.to_string(), output);
    self
  }

  /// Make the shell command or program line fail to spawn.
  pub fn unspawnable(mut self, command: &str) -> Self {
    self.unspawnable.insert(command.to_string());
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.borrow().clone()
  }

  /// Shell commands that were run, in order.
  pub fn shell_commands(&self) -> Vec<String> {
    self
      .calls
      .borrow()
      .iter()
      .filter_map(|call| match call {
        Invocation::Shell { command, .. } => Some(command.clone()),
        Invocation::Program { .. } => None,
      })
      .collect()
  }

  fn spawn_error(program: &str) -> ProcessError {
    ProcessError::Spawn {
      program: program.to_string(),
      source: io::Error::new(io::ErrorKind::NotFound, "scripted spawn failure"),
    }
  }
}

impl CommandRunner for RecordingRunner {
  fn run_shell(&self, invocation: &ShellInvocation) -> Result<CommandOutput, ProcessError> {
    self.calls.borrow_mut().push(Invocation::Shell {
      command: invocation.command.clone(),
      cwd: invocation.cwd.clone(),
    });
    if self.unspawnable.contains(&invocation.command) {
      return Err(Self::spawn_error("sh"));
    }
    Ok(self.shell_outputs.get(&invocation.command).cloned().unwrap_or_else(|| ok("")))
  }

  fn run_program(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, ProcessError> {
    let line = std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
    self.calls.borrow_mut().push(Invocation::Program {
      line: line.clone(),
      cwd: cwd.to_path_buf(),
    });
    if self.unspawnable.contains(&line) {
      return Err(Self::spawn_error(program));
    }
    Ok(self.program_outputs.get(&line).cloned().unwrap_or_else(|| ok("")))
  }
}

/// Successful output with the given stdout.
pub fn ok(stdout: &str) -> CommandOutput {
  CommandOutput {
    status: Some(0),
    stdout: stdout.to_string(),
    stderr: String::new(),
  }
}

/// Failed output with the given exit code and stderr.
pub fn exit(code: i32, stderr: &str) -> CommandOutput {
  CommandOutput {
    status: Some(code),
    stdout: String::new(),
    stderr: stderr.to_string(),
  }
}
