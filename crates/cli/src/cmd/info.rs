use pinhash_lib::platform::platform_triple;

use crate::context::Context;
use crate::output::print_stat;

pub fn cmd_info(ctx: &Context) {
  println!("pinhash {}", env!("CARGO_PKG_VERSION"));
  print_stat("Platform", &platform_triple());
  print_stat("Manifest", &ctx.manifest_path.display().to_string());
  print_stat("Lock file", &ctx.lock_path().display().to_string());
  print_stat("Repository", &ctx.repo_root.display().to_string());
  print_stat("Shell", &ctx.runner.shell());
}
