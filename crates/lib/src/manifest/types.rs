//! Manifest types for pinhash.
//!
//! The manifest (`pinhash.json`) declares every asset of a repository: where
//! its sources live, which submodule pins them, how to build it and where the
//! artifact lands.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "assets": {
//!     "api": {
//!       "source": "lib/assets/api",
//!       "module": "lib/assets/api",
//!       "build": "./dev.make-zip.sh",
//!       "output": "build_function.zip",
//!       "env": { "TARGET": "x86_64" }
//!     }
//!   }
//! }
//! ```
//!
//! `module` defaults to the source directory's path inside the repository
//! root, the form `git submodule status` prints. Relative `source` paths are
//! resolved against the manifest's directory and `~/` expands to the home
//! directory.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// The declared set of assets.
///
/// Uses [`BTreeMap`] so assets are always visited in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
  pub version: u32,
  #[serde(default)]
  pub assets: BTreeMap<String, AssetDecl>,
}

/// One asset as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetDecl {
  /// Source directory, the working directory of the build.
  pub source: String,
  /// Submodule path identifying the source revision.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub module: Option<String>,
  /// Build command, run through the shell.
  pub build: String,
  /// Artifact path relative to `source`.
  pub output: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub env: Option<BTreeMap<String, String>>,
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("manifest not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("unsupported manifest version {0}, expected {MANIFEST_VERSION}")]
  UnsupportedVersion(u32),

  #[error("unknown asset '{0}'")]
  UnknownAsset(String),

  #[error("cannot expand '{0}': home directory is not set")]
  HomeNotSet(String),

  #[error("asset '{name}': source {source_dir} is not inside repository {repo_root}; set \"module\" explicitly")]
  ModuleOutsideRepository {
    name: String,
    source_dir: PathBuf,
    repo_root: PathBuf,
  },
}
