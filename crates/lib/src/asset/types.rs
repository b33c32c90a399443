use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execute::ProcessError;
use crate::submodule::ReferenceLookupFailure;
use crate::util::hash::AssetFingerprint;

/// Everything needed to build one asset and fingerprint it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
  /// Asset identifier, used in logs and lock entries.
  pub name: String,
  /// Working directory of the build command.
  pub source_dir: PathBuf,
  /// Shell command producing the artifact.
  pub build_command: String,
  /// Artifact location relative to `source_dir`.
  pub output_path: PathBuf,
  /// Submodule path whose pinned commit identifies the source.
  pub reference_name: String,
  /// Extra variables for the build, merged over the inherited environment.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub env: Option<BTreeMap<String, String>>,
}

impl BuildSpec {
  pub fn new(name: &str, source_dir: &Path, build_command: &str, output_path: &str, reference_name: &str) -> Self {
    Self {
      name: name.to_string(),
      source_dir: source_dir.to_path_buf(),
      build_command: build_command.to_string(),
      output_path: PathBuf::from(output_path),
      reference_name: reference_name.to_string(),
      env: None,
    }
  }

  pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
    self.env = Some(env);
    self
  }

  /// Where the build is expected to leave its artifact.
  pub fn artifact_path(&self) -> PathBuf {
    self.source_dir.join(&self.output_path)
  }

  /// Check the spec is usable before anything runs.
  pub fn validate(&self) -> Result<(), AssetError> {
    let invalid = |reason: &str| AssetError::InvalidSpec {
      name: self.name.clone(),
      reason: reason.to_string(),
    };

    if self.build_command.trim().is_empty() {
      return Err(invalid("build command is empty"));
    }
    if self.reference_name.trim().is_empty() {
      return Err(invalid("submodule reference is empty"));
    }
    if self.output_path.as_os_str().is_empty() {
      return Err(invalid("output path is empty"));
    }
    if self.output_path.is_absolute() {
      return Err(invalid("output path must be relative to the source directory"));
    }
    Ok(())
  }
}

/// Outcome of a successful resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAsset {
  pub name: String,
  pub artifact_path: PathBuf,
  pub fingerprint: AssetFingerprint,
  /// The submodule commit the fingerprint was derived from.
  pub reference: String,
}

impl ResolvedAsset {
  /// Fail with [`AssetError::MissingArtifact`] if the build left nothing behind.
  pub fn ensure_artifact(&self) -> Result<(), AssetError> {
    if self.artifact_path.exists() {
      Ok(())
    } else {
      Err(AssetError::MissingArtifact {
        name: self.name.clone(),
        path: self.artifact_path.clone(),
      })
    }
  }
}

/// The build step of a resolve failed.
#[derive(Debug, Error)]
pub enum BuildFailure {
  /// The source directory does not exist or is not a directory.
  #[error("source directory does not exist: {path}")]
  SourceDirMissing { path: PathBuf },

  /// The build command exited unsuccessfully.
  #[error("build command failed with exit code {code:?}: {cmd}")]
  Exited {
    cmd: String,
    code: Option<i32>,
    stderr: String,
  },

  /// The shell running the build could not be started.
  #[error("failed to start build command '{cmd}': {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: ProcessError,
  },
}

/// Errors that abort resolving an asset.
#[derive(Debug, Error)]
pub enum AssetError {
  #[error("invalid asset '{name}': {reason}")]
  InvalidSpec { name: String, reason: String },

  #[error("build failed: {0}")]
  Build(#[from] BuildFailure),

  #[error("reference lookup failed: {0}")]
  ReferenceLookup(#[from] ReferenceLookupFailure),

  /// The build succeeded but produced no artifact at the expected path.
  #[error("asset '{name}' produced no artifact at {path}")]
  MissingArtifact { name: String, path: PathBuf },
}
