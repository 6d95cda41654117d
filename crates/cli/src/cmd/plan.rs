//! Implementation of the `ncnn-bundle plan` command.
//!
//! Prints what `build` would do. Nothing is executed and no directory is created.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ncnn_bundle_lib::config::BuildEnv;
use ncnn_bundle_lib::pipeline::BuildPlan;
use ncnn_bundle_lib::platform::PlatformProfile;

use super::{describe_toggle, resolve_paths};
use crate::output::{OutputFormat, print_info, print_json, print_list, print_stat, print_steps, print_warning};

pub fn cmd_plan(project_root: &Path, build_dir: &Path, python: Option<PathBuf>, output: OutputFormat) -> Result<()> {
  let env = BuildEnv::from_env().with_python(python);
  let profile = PlatformProfile::detect(&env);
  let paths = resolve_paths(project_root, build_dir)?;
  let plan = BuildPlan::new(profile, &env, paths).context("Failed to plan the native build")?;

  if output.is_json() {
    return print_json(&plan);
  }

  print_info(&format!("Build plan for {}", plan.profile));
  print_stat("Strategy", &format!("{:?}", plan.strategy));
  print_stat("Tag", &plan.tag);
  print_stat("ALSA", describe_toggle(&plan.features.alsa));
  if plan.features.alsa.suppressed() {
    print_warning("ALSA support was requested but is only available on Linux x86/arm64");
  }

  println!();
  print_steps(&plan.steps);

  println!();
  print_list("Expected artifacts", &plan.spec.file_names());

  println!();
  print_stat("Install tree", &plan.paths.install_root.display().to_string());
  print_stat("Package", &plan.paths.package_root.display().to_string());

  Ok(())
}
