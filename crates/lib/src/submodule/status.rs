//! Parsing and querying `git submodule status`.

use std::path::Path;

use tracing::{debug, warn};

use super::types::{ReferenceLookupFailure, SubmoduleEntry, SubmoduleState};
use crate::execute::CommandRunner;

const MIN_COMMIT_LEN: usize = 7;
const MAX_COMMIT_LEN: usize = 64;

/// List every submodule registered in the repository at `repo_root`.
///
/// Runs `git submodule status` with `repo_root` as the working directory.
pub fn list_submodules<R: CommandRunner + ?Sized>(
  runner: &R,
  repo_root: &Path,
) -> Result<Vec<SubmoduleEntry>, ReferenceLookupFailure> {
  let output = runner
    .run_program("git", &["submodule", "status"], repo_root)
    .map_err(|e| ReferenceLookupFailure::Spawn {
      repo: repo_root.to_path_buf(),
      source: e,
    })?;

  if !output.success() {
    return Err(ReferenceLookupFailure::GitFailed {
      repo: repo_root.to_path_buf(),
      code: output.status,
      stderr: output.stderr.trim().to_string(),
    });
  }

  parse_status(&output.stdout)
}

/// Resolve the pinned commit of the submodule registered at `name`.
///
/// `name` must equal the submodule path exactly (a trailing `/` is ignored).
/// Zero or several matching entries are errors, as is a conflicted
/// submodule. A modified submodule resolves to its checked-out commit.
pub fn lookup_reference<R: CommandRunner + ?Sized>(
  runner: &R,
  repo_root: &Path,
  name: &str,
) -> Result<SubmoduleEntry, ReferenceLookupFailure> {
  let wanted = name.trim_end_matches('/');
  let entries = list_submodules(runner, repo_root)?;

  let mut matches: Vec<SubmoduleEntry> = entries.into_iter().filter(|e| e.path == wanted).collect();

  let entry = match matches.len() {
    0 => return Err(ReferenceLookupFailure::NotFound { name: name.to_string() }),
    1 => matches.remove(0),
    _ => {
      return Err(ReferenceLookupFailure::Ambiguous {
        name: name.to_string(),
        matches: matches.into_iter().map(|e| format!("{} ({})", e.path, e.commit)).collect(),
      });
    }
  };

  match entry.state {
    SubmoduleState::Conflict => return Err(ReferenceLookupFailure::Conflicted { name: name.to_string() }),
    SubmoduleState::Modified => {
      warn!(submodule = %entry.path, commit = %entry.commit, "submodule checkout differs from the pinned commit");
    }
    SubmoduleState::Current | SubmoduleState::Uninitialized => {}
  }

  debug!(submodule = %entry.path, commit = %entry.commit, state = %entry.state, "resolved submodule reference");
  Ok(entry)
}

/// Parse the full stdout of `git submodule status`.
pub fn parse_status(stdout: &str) -> Result<Vec<SubmoduleEntry>, ReferenceLookupFailure> {
  stdout
    .lines()
    .map(|line| line.trim_end_matches('\r'))
    .filter(|line| !line.trim().is_empty())
    .map(parse_line)
    .collect()
}

/// Parse one status line: `<flag><commit> <path>[ (<describe>)]`.
pub fn parse_line(line: &str) -> Result<SubmoduleEntry, ReferenceLookupFailure> {
  let malformed = || ReferenceLookupFailure::Malformed { line: line.to_string() };

  let mut chars = line.chars();
  let flag = chars.next().ok_or_else(malformed)?;
  let state = SubmoduleState::from_flag(flag).ok_or_else(malformed)?;
  let rest = chars.as_str();

  let (commit, remainder) = rest.split_once(' ').ok_or_else(malformed)?;
  if !is_commit(commit) {
    return Err(malformed());
  }

  let (path, describe) = match remainder.strip_suffix(')').and_then(|r| r.rsplit_once(" (")) {
    Some((path, describe)) => (path, Some(describe.to_string())),
    None => (remainder, None),
  };

  if path.is_empty() {
    return Err(malformed());
  }

  Ok(SubmoduleEntry {
    state,
    commit: commit.to_string(),
    path: path.to_string(),
    describe,
  })
}

fn is_commit(token: &str) -> bool {
  (MIN_COMMIT_LEN..=MAX_COMMIT_LEN).contains(&token.len()) && token.chars().all(|c| c.is_ascii_hexdigit())
}
