use anyhow::{Context as _, Result};

use pinhash_lib::submodule::list_submodules;

use crate::context::Context;
use crate::output::{OutputFormat, print_info, print_json, print_stat};

/// List the submodules registered in the repository root.
pub fn cmd_submodules(ctx: &Context, format: OutputFormat) -> Result<()> {
  let entries = list_submodules(&ctx.runner, &ctx.repo_root)
    .with_context(|| format!("Failed to list submodules in {}", ctx.repo_root.display()))?;

  if format.is_json() {
    return print_json(&entries);
  }

  if entries.is_empty() {
    print_info("No submodules registered");
    return Ok(());
  }

  for entry in &entries {
    print_stat(&entry.path, &format!("{} ({})", entry.commit, entry.state));
  }

  Ok(())
}
