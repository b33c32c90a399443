use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execute::ProcessError;

/// State flag printed in front of each `git submodule status` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmoduleState {
  /// Checked out at the pinned commit (` `).
  Current,
  /// Registered but not initialized (`-`).
  Uninitialized,
  /// Checked-out commit differs from the pinned one (`+`).
  Modified,
  /// Merge conflicts (`U`).
  Conflict,
}

impl SubmoduleState {
  pub fn from_flag(flag: char) -> Option<Self> {
    match flag {
      ' ' => Some(Self::Current),
      '-' => Some(Self::Uninitialized),
      '+' => Some(Self::Modified),
      'U' => Some(Self::Conflict),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Current => "current",
      Self::Uninitialized => "uninitialized",
      Self::Modified => "modified",
      Self::Conflict => "conflict",
    }
  }
}

impl fmt::Display for SubmoduleState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One parsed line of `git submodule status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmoduleEntry {
  pub state: SubmoduleState,
  /// Commit hash reported by git.
  pub commit: String,
  /// Path of the submodule relative to the repository root.
  pub path: String,
  /// Output of `git describe` for the commit, when git printed one.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub describe: Option<String>,
}

/// Errors that can occur while resolving a submodule reference.
#[derive(Debug, Error)]
pub enum ReferenceLookupFailure {
  /// `git submodule status` exited non-zero (e.g. not a repository).
  #[error("git submodule status failed in '{repo}' with exit code {code:?}: {stderr}")]
  GitFailed {
    repo: PathBuf,
    code: Option<i32>,
    stderr: String,
  },

  /// `git` could not be started.
  #[error("failed to run git in '{repo}': {source}")]
  Spawn {
    repo: PathBuf,
    #[source]
    source: ProcessError,
  },

  /// No submodule is registered at the requested path.
  #[error("no submodule registered for '{name}'")]
  NotFound { name: String },

  /// More than one status line matched the requested path.
  #[error("submodule reference '{name}' is ambiguous: {}", .matches.join(", "))]
  Ambiguous { name: String, matches: Vec<String> },

  /// The submodule has unresolved merge conflicts.
  #[error("submodule '{name}' has merge conflicts")]
  Conflicted { name: String },

  /// A status line could not be parsed.
  #[error("malformed submodule status line: '{line}'")]
  Malformed { line: String },
}
