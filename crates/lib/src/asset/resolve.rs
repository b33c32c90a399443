//! Building assets and deriving their fingerprints.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::{AssetError, BuildFailure, BuildSpec, ResolvedAsset};
use crate::execute::{CommandRunner, ShellInvocation};
use crate::submodule::{SubmoduleEntry, lookup_reference};
use crate::util::hash::AssetFingerprint;

/// Resolves [`BuildSpec`]s into built artifacts and fingerprints.
///
/// `repo_root` is the superproject in which submodule references are looked
/// up. Each call is independent, but two resolves running the same
/// non-reentrant build in one source directory at once are not guarded
/// against; callers must serialize those.
#[derive(Debug)]
pub struct AssetResolver<R> {
  runner: R,
  repo_root: PathBuf,
}

impl<R: CommandRunner> AssetResolver<R> {
  pub fn new(runner: R, repo_root: &Path) -> Self {
    Self {
      runner,
      repo_root: repo_root.to_path_buf(),
    }
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Run the build for `spec` and fingerprint the result.
  ///
  /// The submodule reference is looked up before the build runs, so a spec
  /// whose reference cannot be resolved never triggers a build. Any failure
  /// aborts the call without a fingerprint.
  pub fn resolve(&self, spec: &BuildSpec) -> Result<ResolvedAsset, AssetError> {
    Self::check(spec)?;
    let entry = self.lookup(spec)?;
    self.build_at(spec, entry.commit)
  }

  /// Like [`resolve`](Self::resolve), but with a submodule commit the caller
  /// already looked up, typically from [`fingerprint`](Self::fingerprint).
  pub fn resolve_pinned(&self, spec: &BuildSpec, reference: &str) -> Result<ResolvedAsset, AssetError> {
    Self::check(spec)?;
    self.build_at(spec, reference.to_string())
  }

  fn check(spec: &BuildSpec) -> Result<(), AssetError> {
    spec.validate()?;

    if !spec.source_dir.is_dir() {
      return Err(
        BuildFailure::SourceDirMissing {
          path: spec.source_dir.clone(),
        }
        .into(),
      );
    }
    Ok(())
  }

  fn build_at(&self, spec: &BuildSpec, reference: String) -> Result<ResolvedAsset, AssetError> {
    self.build(spec)?;

    let fingerprint = AssetFingerprint::compute(&reference, &spec.build_command);
    let artifact_path = spec.artifact_path();

    if !artifact_path.exists() {
      debug!(asset = %spec.name, path = %artifact_path.display(), "artifact not found after build");
    }

    info!(asset = %spec.name, fingerprint = %fingerprint, "asset resolved");

    Ok(ResolvedAsset {
      name: spec.name.clone(),
      artifact_path,
      fingerprint,
      reference,
    })
  }

  /// Fingerprint `spec` without building it.
  ///
  /// Returns the resolved submodule commit along with the fingerprint.
  pub fn fingerprint(&self, spec: &BuildSpec) -> Result<(String, AssetFingerprint), AssetError> {
    spec.validate()?;
    let entry = self.lookup(spec)?;
    let fingerprint = AssetFingerprint::compute(&entry.commit, &spec.build_command);
    Ok((entry.commit, fingerprint))
  }

  fn lookup(&self, spec: &BuildSpec) -> Result<SubmoduleEntry, AssetError> {
    Ok(lookup_reference(&self.runner, &self.repo_root, &spec.reference_name)?)
  }

  fn build(&self, spec: &BuildSpec) -> Result<(), BuildFailure> {
    info!(asset = %spec.name, cmd = %spec.build_command, "building asset");

    let mut invocation = ShellInvocation::new(&spec.build_command, &spec.source_dir);
    if let Some(env) = &spec.env {
      invocation = invocation.with_env(env.clone());
    }

    let output = self.runner.run_shell(&invocation).map_err(|e| BuildFailure::Spawn {
      cmd: spec.build_command.clone(),
      source: e,
    })?;

    if !output.success() {
      if !output.stderr.is_empty() {
        debug!(stderr = %output.stderr, "command stderr");
      }
      if !output.stdout.is_empty() {
        debug!(stdout = %output.stdout, "command stdout");
      }

      return Err(BuildFailure::Exited {
        cmd: spec.build_command.clone(),
        code: output.status,
        stderr: output.stderr.trim().to_string(),
      });
    }

    Ok(())
  }
}
