//! Implementation of the `pinhash resolve` command.
//!
//! Builds the selected assets, skipping those whose fingerprint matches the
//! lock file and whose artifact is still present, and records the new
//! fingerprints in `pinhash.lock`.

use std::time::Instant;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tracing::info;

use pinhash_lib::lock::{AssetStatus, LockFile};
use pinhash_lib::util::hash::AssetFingerprint;

use crate::context::Context;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_success, print_warning, symbols};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Action {
  Built,
  Skipped,
}

#[derive(Debug, Serialize)]
struct Outcome {
  name: String,
  action: Action,
  fingerprint: AssetFingerprint,
  reference: String,
  artifact: String,
}

/// Execute the resolve command.
///
/// The lock file is saved after every built asset, so assets that succeeded
/// before a failure stay recorded. The first failure aborts the run.
pub fn cmd_resolve(ctx: &Context, names: &[String], force: bool, format: OutputFormat) -> Result<()> {
  let manifest = ctx.manifest()?;
  let specs = manifest.select(names, &ctx.base_dir, &ctx.repo_root)?;
  let resolver = ctx.resolver();

  let lock_path = ctx.lock_path();
  let mut lock = LockFile::load(&lock_path)
    .with_context(|| format!("Failed to load lock file: {}", lock_path.display()))?
    .unwrap_or_default();

  if specs.is_empty() && !format.is_json() {
    print_info("No assets declared in manifest");
  }

  let mut outcomes = Vec::with_capacity(specs.len());

  for spec in &specs {
    let mut pinned = None;

    if !force {
      let (reference, fingerprint) = resolver
        .fingerprint(spec)
        .with_context(|| format!("Failed to fingerprint asset '{}'", spec.name))?;

      if lock.status(&spec.name, &fingerprint) == AssetStatus::Unchanged {
        let artifact = spec.artifact_path();
        if artifact.exists() {
          info!(asset = %spec.name, "unchanged, skipping build");
          if !format.is_json() {
            print_info(&format!("{} unchanged ({})", spec.name, fingerprint.short()));
          }
          outcomes.push(Outcome {
            name: spec.name.clone(),
            action: Action::Skipped,
            fingerprint,
            reference,
            artifact: artifact.display().to_string(),
          });
          continue;
        }
        if !format.is_json() {
          print_warning(&format!("{} unchanged but artifact is missing, rebuilding", spec.name));
        }
      }
      pinned = Some(reference);
    }

    let started = Instant::now();
    let resolved = match &pinned {
      Some(reference) => resolver.resolve_pinned(spec, reference),
      None => resolver.resolve(spec),
    }
    .with_context(|| format!("Failed to resolve asset '{}'", spec.name))?;
    resolved.ensure_artifact()?;

    lock.record(&resolved, &ctx.base_dir);
    lock
      .save(&lock_path)
      .with_context(|| format!("Failed to write lock file: {}", lock_path.display()))?;

    if !format.is_json() {
      print_success(&format!(
        "{} {} {} {} ({})",
        resolved.name,
        resolved.fingerprint.short(),
        symbols::ARROW,
        resolved.artifact_path.display(),
        format_duration(started.elapsed())
      ));
    }

    outcomes.push(Outcome {
      name: resolved.name,
      action: Action::Built,
      fingerprint: resolved.fingerprint,
      reference: resolved.reference,
      artifact: resolved.artifact_path.display().to_string(),
    });
  }

  if format.is_json() {
    print_json(&outcomes)?;
  }

  Ok(())
}
