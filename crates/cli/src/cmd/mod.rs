mod build;
mod info;
mod plan;

use std::path::Path;

use anyhow::{Context, Result};

use ncnn_bundle_lib::build::BuildPaths;
use ncnn_bundle_lib::features::FeatureToggle;

pub use build::cmd_build;
pub use info::cmd_info;
pub use plan::cmd_plan;

/// Absolute run directories. The composite build `cd`s into the scratch
/// directory, so relative paths would resolve against the wrong place.
fn resolve_paths(project_root: &Path, build_dir: &Path) -> Result<BuildPaths> {
  let project_root = dunce::canonicalize(project_root)
    .with_context(|| format!("Project root not found: {}", project_root.display()))?;
  let build_dir = std::path::absolute(build_dir)
    .with_context(|| format!("Invalid build directory: {}", build_dir.display()))?;
  Ok(BuildPaths::under(project_root, &build_dir))
}

fn describe_toggle(toggle: &FeatureToggle) -> &'static str {
  if toggle.enabled() {
    "enabled"
  } else if toggle.suppressed() {
    "requested, unsupported on this platform"
  } else {
    "disabled"
  }
}
