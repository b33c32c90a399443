mod cmd;
mod context;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pinhash_lib::consts::{APP_NAME, MANIFEST_FILENAME};

use crate::cmd::{cmd_fingerprint, cmd_info, cmd_plan, cmd_resolve, cmd_submodules};
use crate::context::Context;
use crate::output::{OutputFormat, print_error};

/// pinhash - build submodule assets and fingerprint them by pinned commit
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the asset manifest
  #[arg(short, long, global = true, default_value = MANIFEST_FILENAME)]
  manifest: PathBuf,

  /// Repository that registers the submodules (default: the manifest's directory)
  #[arg(long, global = true)]
  repo: Option<PathBuf>,

  /// Shell used to run build commands (default: $PINHASH_SHELL or /bin/sh)
  #[arg(long, global = true)]
  shell: Option<String>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build assets and record their fingerprints
  Resolve {
    /// Assets to resolve (default: all)
    names: Vec<String>,

    /// Rebuild even when the fingerprint is unchanged
    #[arg(short, long)]
    force: bool,
  },

  /// Show which assets changed since the last resolve, without building
  Plan,

  /// Print the fingerprint of one asset without building it
  Fingerprint {
    /// Asset name
    name: String,
  },

  /// List submodules registered in the repository
  Submodules,

  /// Show configuration and platform information
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let ctx = Context::new(&cli.manifest, cli.repo.as_deref(), cli.shell.as_deref())?;

  match cli.command {
    Commands::Resolve { names, force } => cmd_resolve(&ctx, &names, force, cli.output),
    Commands::Plan => cmd_plan(&ctx, cli.output),
    Commands::Fingerprint { name } => cmd_fingerprint(&ctx, &name, cli.output),
    Commands::Submodules => cmd_submodules(&ctx, cli.output),
    Commands::Info => {
      cmd_info(&ctx);
      Ok(())
    }
  }
}
