//! Implementation of the `pinhash plan` command.
//!
//! Fingerprints every asset without building and reports which ones differ
//! from the lock file.

use anyhow::{Context as _, Result};

use pinhash_lib::lock::{AssetStatus, LockFile};
use pinhash_lib::plan::plan;

use crate::context::Context;
use crate::output::{OutputFormat, print_change, print_info, print_json, print_stat, print_success, symbols};

pub fn cmd_plan(ctx: &Context, format: OutputFormat) -> Result<()> {
  let manifest = ctx.manifest()?;
  let specs = manifest.build_specs(&ctx.base_dir, &ctx.repo_root)?;

  let lock_path = ctx.lock_path();
  let lock = LockFile::load(&lock_path).with_context(|| format!("Failed to load lock file: {}", lock_path.display()))?;

  let plan = plan(&ctx.resolver(), &specs, lock.as_ref()).context("Failed to compute plan")?;

  if format.is_json() {
    return print_json(&plan);
  }

  for asset in &plan.assets {
    match &asset.status {
      AssetStatus::New => print_change(symbols::ADD, &format!("{} (new, {})", asset.name, asset.fingerprint.short())),
      AssetStatus::Changed { previous } => print_change(
        symbols::MODIFY,
        &format!(
          "{} ({} {} {})",
          asset.name,
          previous.short(),
          symbols::ARROW,
          asset.fingerprint.short()
        ),
      ),
      AssetStatus::Unchanged => print_success(&format!("{} (unchanged, {})", asset.name, asset.fingerprint.short())),
    }
  }

  println!();
  print_stat("Assets", &plan.assets.len().to_string());
  print_stat("To build", &plan.to_build().len().to_string());

  if !plan.has_changes() {
    print_info("Nothing to build");
  }

  Ok(())
}
