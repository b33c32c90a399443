//! System process runner.
//!
//! Runs build commands through the platform shell and helper programs such as
//! `git` directly, always with an explicit working directory.

use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use super::types::{CommandOutput, CommandRunner, ProcessError, ShellInvocation};

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
  shell: Option<String>,
}

impl SystemRunner {
  pub fn new() -> Self {
    Self { shell: None }
  }

  /// Use `shell` instead of the platform default for build commands.
  pub fn with_shell(mut self, shell: &str) -> Self {
    self.shell = Some(shell.to_string());
    self
  }

  /// The shell program build commands run under.
  pub fn shell(&self) -> String {
    get_shell(self.shell.as_deref()).0
  }
}

impl CommandRunner for SystemRunner {
  fn run_shell(&self, invocation: &ShellInvocation) -> Result<CommandOutput, ProcessError> {
    let (shell_cmd, shell_args) = get_shell(self.shell.as_deref());

    let mut command = Command::new(&shell_cmd);
    command.args(&shell_args).arg(&invocation.command).current_dir(&invocation.cwd);

    if let Some(env) = &invocation.env {
      command.envs(env);
    }

    debug!(shell = %shell_cmd, working_dir = ?invocation.cwd, "spawning process");

    let output = command.output().map_err(|e| ProcessError::Spawn {
      program: shell_cmd.clone(),
      source: e,
    })?;

    Ok(capture(output))
  }

  fn run_program(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, ProcessError> {
    debug!(program, ?args, working_dir = ?cwd, "spawning process");

    let output = Command::new(program)
      .args(args)
      .current_dir(cwd)
      .output()
      .map_err(|e| ProcessError::Spawn {
        program: program.to_string(),
        source: e,
      })?;

    Ok(capture(output))
  }
}

fn capture(output: Output) -> CommandOutput {
  CommandOutput {
    status: output.status.code(),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
  }
}

/// Get the shell command and arguments for the current platform.
///
/// An override picks its argument style from the program name; otherwise
/// `/bin/sh -c` is used on Unix and `cmd.exe /C` on Windows. `$SHELL` is
/// ignored so that user profiles do not leak into builds.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec!["-NoProfile".to_string(), "-Command".to_string()]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    ("cmd.exe".to_string(), vec!["/C".to_string()])
  }
}
