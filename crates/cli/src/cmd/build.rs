//! Implementation of the `ncnn-bundle build` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use ncnn_bundle_lib::build::BuildInvoker;
use ncnn_bundle_lib::config::BuildEnv;
use ncnn_bundle_lib::pipeline::{self, PipelineRequest};
use ncnn_bundle_lib::platform::PlatformProfile;

use super::resolve_paths;
use crate::output::{
  OutputFormat, format_bytes, format_duration, print_artifacts, print_json, print_stat, print_success,
};

/// Build the native project and assemble the package.
///
/// Any failure aborts the run; the package `bin/` directory is only created
/// once every expected artifact has been copied.
pub fn cmd_build(
  project_root: &Path,
  build_dir: &Path,
  python: Option<PathBuf>,
  skip_build: bool,
  output: OutputFormat,
) -> Result<()> {
  let start = Instant::now();

  let env = BuildEnv::from_env().with_python(python);
  let request = PipelineRequest {
    profile: PlatformProfile::detect(&env),
    env,
    paths: resolve_paths(project_root, build_dir)?,
    skip_build,
    invoker: BuildInvoker::new(),
  };

  debug!(paths = ?request.paths, "resolved paths");
  let report = pipeline::run(&request).context("Packaging failed")?;

  if output.is_json() {
    print_json(&report)?;
    return Ok(());
  }

  println!();
  print_success("Package assembled!");
  print_stat("Platform", &report.plan.profile.to_string());
  print_stat("Tag", &report.plan.tag);
  if let Some(version) = &report.plan.version {
    print_stat("Version", version);
  }
  print_stat("Binaries", &report.assembly.bin_dir.display().to_string());
  print_artifacts("Copied", &report.assembly.copied);
  print_stat("Pruned", &format_bytes(report.assembly.pruned_bytes));
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
