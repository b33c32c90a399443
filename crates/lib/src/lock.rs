//! Lock file management for resolved assets.
//!
//! The lock file (`pinhash.lock`) records the fingerprint of every asset as of
//! its last successful resolve. Comparing a freshly computed fingerprint with
//! the recorded one tells whether an asset needs rebuilding. It's stored in the
//! same directory as the manifest.
//!
//! # Lock File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "assets": {
//!     "api": {
//!       "fingerprint": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!       "reference": "a1b2c3d4...",
//!       "artifact": "lib/assets/api/build_function.zip"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::ResolvedAsset;
use crate::util::hash::AssetFingerprint;

/// Current lock file format version.
pub const LOCK_VERSION: u32 = 1;

/// A lock file containing the last recorded fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
  /// Lock file format version.
  pub version: u32,
  /// Locked assets, keyed by asset name.
  pub assets: BTreeMap<String, LockedAsset>,
}

/// A locked asset entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedAsset {
  pub fingerprint: AssetFingerprint,
  /// Submodule commit the fingerprint was derived from.
  pub reference: String,
  /// Artifact produced by the build, relative to the lock file's directory
  /// when it lies below it.
  pub artifact: PathBuf,
}

/// How an asset's current fingerprint compares with the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssetStatus {
  /// Not in the lock file yet.
  New,
  /// Fingerprint differs from the recorded one.
  Changed { previous: AssetFingerprint },
  /// Fingerprint matches; nothing to redeploy.
  Unchanged,
}

impl AssetStatus {
  pub fn needs_build(&self) -> bool {
    !matches!(self, AssetStatus::Unchanged)
  }
}

/// Errors that can occur when working with lock files.
#[derive(Debug, Error)]
pub enum LockError {
  /// Failed to read the lock file.
  #[error("failed to read lock file: {0}")]
  Read(#[source] io::Error),

  /// Failed to write the lock file.
  #[error("failed to write lock file: {0}")]
  Write(#[source] io::Error),

  /// Failed to parse the lock file JSON.
  #[error("failed to parse lock file: {0}")]
  Parse(#[source] serde_json::Error),

  /// Failed to serialize the lock file.
  #[error("failed to serialize lock file: {0}")]
  Serialize(#[source] serde_json::Error),

  /// Lock file version is not supported.
  #[error("unsupported lock file version {0}, expected {LOCK_VERSION}")]
  UnsupportedVersion(u32),
}

impl Default for LockFile {
  fn default() -> Self {
    Self::new()
  }
}

impl LockFile {
  /// Create a new empty lock file.
  pub fn new() -> Self {
    Self {
      version: LOCK_VERSION,
      assets: BTreeMap::new(),
    }
  }

  /// Load a lock file from the given path.
  ///
  /// Returns `Ok(None)` if the file doesn't exist.
  /// Returns `Ok(Some(lock))` if the file exists and was parsed successfully.
  /// Returns `Err` if the file exists but couldn't be read or parsed.
  pub fn load(path: &Path) -> Result<Option<Self>, LockError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(LockError::Read(e)),
    };

    let lock: LockFile = serde_json::from_str(&content).map_err(LockError::Parse)?;

    if lock.version != LOCK_VERSION {
      return Err(LockError::UnsupportedVersion(lock.version));
    }

    Ok(Some(lock))
  }

  /// Save the lock file to the given path.
  ///
  /// The file is written with pretty-printed JSON for readability.
  pub fn save(&self, path: &Path) -> Result<(), LockError> {
    let content = serde_json::to_string_pretty(self).map_err(LockError::Serialize)?;
    fs::write(path, content).map_err(LockError::Write)?;
    Ok(())
  }

  /// Get a locked asset by name.
  pub fn get(&self, name: &str) -> Option<&LockedAsset> {
    self.assets.get(name)
  }

  /// Record a freshly resolved asset.
  ///
  /// The artifact path is stored relative to `base_dir` so the lock file
  /// reads the same on every checkout.
  pub fn record(&mut self, resolved: &ResolvedAsset, base_dir: &Path) {
    let artifact = resolved
      .artifact_path
      .strip_prefix(base_dir)
      .map(Path::to_path_buf)
      .unwrap_or_else(|_| resolved.artifact_path.clone());

    self.assets.insert(
      resolved.name.clone(),
      LockedAsset {
        fingerprint: resolved.fingerprint.clone(),
        reference: resolved.reference.clone(),
        artifact,
      },
    );
  }

  /// Compare `fingerprint` with the recorded entry for `name`.
  pub fn status(&self, name: &str, fingerprint: &AssetFingerprint) -> AssetStatus {
    match self.get(name) {
      None => AssetStatus::New,
      Some(locked) if &locked.fingerprint == fingerprint => AssetStatus::Unchanged,
      Some(locked) => AssetStatus::Changed {
        previous: locked.fingerprint.clone(),
      },
    }
  }
}
