//! Paths and collaborators shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use pinhash_lib::asset::AssetResolver;
use pinhash_lib::consts::{LOCK_FILENAME, SHELL_ENV_VAR};
use pinhash_lib::execute::SystemRunner;
use pinhash_lib::manifest::Manifest;

pub struct Context {
  pub manifest_path: PathBuf,
  /// Directory containing the manifest; relative asset paths start here.
  pub base_dir: PathBuf,
  /// Superproject where submodule references are looked up.
  pub repo_root: PathBuf,
  pub runner: SystemRunner,
}

impl Context {
  /// Resolve paths from the command line.
  ///
  /// `shell` falls back to `PINHASH_SHELL`, then to the platform default.
  pub fn new(manifest: &Path, repo: Option<&Path>, shell: Option<&str>) -> Result<Self> {
    let base_dir = match manifest.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    };
    let base_dir = dunce::canonicalize(&base_dir)
      .with_context(|| format!("Failed to resolve manifest directory: {}", base_dir.display()))?;

    let manifest_path = match manifest.file_name() {
      Some(file_name) => base_dir.join(file_name),
      None => anyhow::bail!("Invalid manifest path: {}", manifest.display()),
    };

    let repo_root = match repo {
      Some(repo) => {
        dunce::canonicalize(repo).with_context(|| format!("Failed to resolve repository root: {}", repo.display()))?
      }
      None => base_dir.clone(),
    };

    let shell = shell.map(str::to_string).or_else(|| std::env::var(SHELL_ENV_VAR).ok());
    let runner = match shell {
      Some(shell) if !shell.is_empty() => SystemRunner::new().with_shell(&shell),
      _ => SystemRunner::new(),
    };

    Ok(Self {
      manifest_path,
      base_dir,
      repo_root,
      runner,
    })
  }

  pub fn manifest(&self) -> Result<Manifest> {
    Manifest::load(&self.manifest_path)
      .with_context(|| format!("Failed to load manifest: {}", self.manifest_path.display()))
  }

  pub fn resolver(&self) -> AssetResolver<&SystemRunner> {
    AssetResolver::new(&self.runner, &self.repo_root)
  }

  pub fn lock_path(&self) -> PathBuf {
    self.base_dir.join(LOCK_FILENAME)
  }
}
