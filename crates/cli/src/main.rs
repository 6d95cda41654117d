mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// ncnn-bundle - build sherpa-ncnn and assemble its binaries into a package
#[derive(Parser)]
#[command(name = "ncnn-bundle")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format for reports
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct PathArgs {
  /// CMake project to build
  #[arg(long, default_value = ".")]
  project_root: PathBuf,

  /// Directory for the CMake tree, install tree and package
  #[arg(long, default_value = "build")]
  build_dir: PathBuf,

  /// Python interpreter handed to CMake (default: PYTHON_EXECUTABLE, then PATH)
  #[arg(long)]
  python: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the native build and assemble the package
  Build {
    #[command(flatten)]
    paths: PathArgs,

    /// Package an existing install tree without running CMake
    #[arg(long)]
    skip_build: bool,
  },

  /// Show the configuration, commands and expected artifacts without running anything
  Plan {
    #[command(flatten)]
    paths: PathArgs,
  },

  /// Show the detected platform and feature flags
  Info {
    /// CMake project to read the version from
    #[arg(long, default_value = ".")]
    project_root: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  match cli.command {
    Commands::Build { paths, skip_build } => cmd::cmd_build(
      &paths.project_root,
      &paths.build_dir,
      paths.python,
      skip_build,
      cli.output,
    ),
    Commands::Plan { paths } => cmd::cmd_plan(&paths.project_root, &paths.build_dir, paths.python, cli.output),
    Commands::Info { project_root } => cmd::cmd_info(&project_root, cli.output),
  }
}
