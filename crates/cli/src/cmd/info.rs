use std::path::Path;

use anyhow::Result;

use ncnn_bundle_lib::config::BuildEnv;
use ncnn_bundle_lib::features::FeatureFlags;
use ncnn_bundle_lib::platform::{PlatformProfile, Purity};
use ncnn_bundle_lib::project::ProjectVersion;

use super::describe_toggle;
use crate::output::{OutputFormat, print_info, print_json, print_stat};

pub fn cmd_info(project_root: &Path, output: OutputFormat) -> Result<()> {
  let env = BuildEnv::from_env();
  let profile = PlatformProfile::detect(&env);
  let features = FeatureFlags::resolve(&profile, &env);
  let purity = Purity::for_profile(&profile);
  let version = ProjectVersion::read(project_root).map(|v| v.0);

  if output.is_json() {
    return print_json(&serde_json::json!({
      "profile": profile,
      "purity": purity,
      "tag": purity.tag(&profile),
      "features": features,
      "version": version,
      "python": env.python,
    }));
  }

  print_info("System:");
  print_stat("OS", profile.os.as_str());
  print_stat("Arch", profile.arch.as_str());
  print_stat("Packaging build", &profile.is_packaging_build.to_string());
  print_stat("Tag", &purity.tag(&profile));
  print_stat("ALSA", describe_toggle(&features.alsa));
  print_stat("Version", version.as_deref().unwrap_or("unknown"));
  print_stat(
    "Python",
    &env
      .python
      .as_ref()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "not found".to_string()),
  );

  Ok(())
}
