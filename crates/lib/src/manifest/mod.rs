//! Asset manifest loading.
//!
//! Turns the declarations in `pinhash.json` into [`BuildSpec`]s with absolute
//! source directories.

mod types;

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

pub use types::*;

use crate::asset::BuildSpec;
use crate::platform::paths::home_dir;

impl Manifest {
  pub fn new() -> Self {
    Self {
      version: MANIFEST_VERSION,
      assets: Default::default(),
    }
  }

  /// Load a manifest from the given path.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ManifestError::NotFound(path.to_path_buf())),
      Err(e) => {
        return Err(ManifestError::Read {
          path: path.to_path_buf(),
          source: e,
        });
      }
    };

    let manifest: Manifest = serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    if manifest.version != MANIFEST_VERSION {
      return Err(ManifestError::UnsupportedVersion(manifest.version));
    }

    debug!(path = %path.display(), assets = manifest.assets.len(), "loaded manifest");
    Ok(manifest)
  }

  /// Build the spec for a single asset.
  ///
  /// Relative sources start at `base_dir`. Submodule paths are relative to
  /// `repo_root`.
  pub fn spec(&self, name: &str, base_dir: &Path, repo_root: &Path) -> Result<BuildSpec, ManifestError> {
    let decl = self
      .assets
      .get(name)
      .ok_or_else(|| ManifestError::UnknownAsset(name.to_string()))?;

    let source_dir = expand_path(&decl.source, base_dir)?;
    let module = match &decl.module {
      Some(module) => normalize_module(module),
      None => default_module(name, &source_dir, repo_root)?,
    };
    let mut spec = BuildSpec::new(name, &source_dir, &decl.build, &decl.output, &module);
    if let Some(env) = &decl.env {
      spec = spec.with_env(env.clone());
    }
    Ok(spec)
  }

  /// Specs for every asset, in name order.
  pub fn build_specs(&self, base_dir: &Path, repo_root: &Path) -> Result<Vec<BuildSpec>, ManifestError> {
    self.assets.keys().map(|name| self.spec(name, base_dir, repo_root)).collect()
  }

  /// Specs for the named assets, or for all assets when `names` is empty.
  pub fn select(&self, names: &[String], base_dir: &Path, repo_root: &Path) -> Result<Vec<BuildSpec>, ManifestError> {
    if names.is_empty() {
      return self.build_specs(base_dir, repo_root);
    }
    names.iter().map(|name| self.spec(name, base_dir, repo_root)).collect()
  }
}

impl Default for Manifest {
  fn default() -> Self {
    Self::new()
  }
}

/// Expand a manifest path.
///
/// Handles:
/// - Tilde expansion (`~` -> home directory)
/// - Relative paths (resolved against `base_dir`, `.` components dropped)
/// - Absolute paths (kept as-is)
pub fn expand_path(path_str: &str, base_dir: &Path) -> Result<PathBuf, ManifestError> {
  let home = || home_dir().ok_or_else(|| ManifestError::HomeNotSet(path_str.to_string()));

  let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
    home()?.join(rest)
  } else if path_str == "~" {
    home()?
  } else if Path::new(path_str).is_absolute() {
    PathBuf::from(path_str)
  } else {
    base_dir.join(path_str)
  };

  Ok(expanded.components().filter(|c| !matches!(c, Component::CurDir)).collect())
}

/// Join path components with `/`, dropping `.` and trailing separators.
fn join_components(path: &Path) -> String {
  path
    .components()
    .filter(|c| !matches!(c, Component::CurDir))
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

fn normalize_module(module: &str) -> String {
  join_components(Path::new(module))
}

/// The submodule path of `source_dir`, relative to `repo_root`.
fn default_module(name: &str, source_dir: &Path, repo_root: &Path) -> Result<String, ManifestError> {
  let outside = || ManifestError::ModuleOutsideRepository {
    name: name.to_string(),
    source_dir: source_dir.to_path_buf(),
    repo_root: repo_root.to_path_buf(),
  };

  let relative = source_dir.strip_prefix(repo_root).map_err(|_| outside())?;
  if relative.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
    return Err(outside());
  }

  let module = join_components(relative);
  if module.is_empty() {
    return Err(outside());
  }
  Ok(module)
}
