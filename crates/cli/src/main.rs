//! julib: a minimal build driver for juli sources.
//!
//! Discovers `.jl` files under the given inputs, compiles each with the
//! configured external compiler, links the objects into one binary, and
//! optionally removes the intermediate objects.

mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use julibuild_lib::builder::Builder;
use julibuild_lib::config::Config;
use julibuild_lib::consts;

/// Compile juli sources and link them into a single binary.
///
/// Compiler and linker commands are read from `julibuild.toml` in the
/// current directory.
#[derive(Parser)]
#[command(name = "julib", version, about)]
struct Cli {
  /// Source files or directories to compile.
  #[arg(required = true)]
  inputs: Vec<PathBuf>,

  /// Output binary name, resolved against the build directory.
  #[arg(short, long, default_value = consts::DEFAULT_OUTPUT)]
  output: PathBuf,

  /// Directory where object files are staged.
  #[arg(short, long, default_value = ".")]
  build_dir: PathBuf,

  /// Delete the staged object files after linking.
  #[arg(long)]
  remove_objects: bool,

  /// Enable verbose output.
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
    .without_time()
    .with_writer(std::io::stderr)
    .init();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      output::print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = Config::load(Path::new(consts::CONFIG_FILE_NAME)).context("failed to load build configuration")?;

  let mut builder = Builder::new(config, &cli.output, &cli.build_dir)?;

  for input in &cli.inputs {
    output::print_step(&format!("Compiling {}", input.display()));
    builder.compile(input)?;
  }

  output::print_step(&format!("Linking {}", builder.output().display()));
  builder.link()?;

  if cli.remove_objects {
    builder.remove_objects();
  }

  output::print_success(&format!("Built {}", builder.output().display()));
  Ok(())
}
