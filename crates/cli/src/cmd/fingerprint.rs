use anyhow::{Context as _, Result};

use crate::context::Context;
use crate::output::{OutputFormat, print_json};

/// Print the fingerprint of one asset without building it.
///
/// Text output is the bare fingerprint so it can be used in scripts.
pub fn cmd_fingerprint(ctx: &Context, name: &str, format: OutputFormat) -> Result<()> {
  let manifest = ctx.manifest()?;
  let spec = manifest.spec(name, &ctx.base_dir, &ctx.repo_root)?;

  let (reference, fingerprint) = ctx
    .resolver()
    .fingerprint(&spec)
    .with_context(|| format!("Failed to fingerprint asset '{}'", name))?;

  if format.is_json() {
    print_json(&serde_json::json!({ "name": name, "reference": reference, "fingerprint": fingerprint }))
  } else {
    println!("{}", fingerprint);
    Ok(())
  }
}
