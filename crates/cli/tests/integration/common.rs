//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

use ncnn_bundle_lib::artifact::ArtifactSpec;
use ncnn_bundle_lib::config::BuildEnv;
use ncnn_bundle_lib::consts::env;
use ncnn_bundle_lib::features::FeatureFlags;
use ncnn_bundle_lib::platform::PlatformProfile;

/// Variables the binary reads; cleared so the host environment cannot leak in.
const BUNDLE_VARS: &[&str] = &[
  env::CMAKE_ARGS,
  env::MAKE_ARGS,
  env::SYSTEM_MAKE_ARGS,
  env::PACKAGING_BUILD,
  env::ENABLE_ALSA,
];

/// Isolated test environment.
///
/// Each test gets its own project root with a `build/` directory underneath.
pub struct TestEnv {
  pub temp: TempDir,
  pub alsa: bool,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(
      temp.path().join("CMakeLists.txt"),
      "project(sherpa-ncnn)\nset(SHERPA_NCNN_VERSION \"1.2.3\")\n",
    )
    .unwrap();
    Self { temp, alsa: false }
  }

  pub fn with_alsa(mut self) -> Self {
    self.alsa = true;
    self
  }

  pub fn project_root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn install_root(&self) -> PathBuf {
    self.project_root().join("build").join("lib").join("sherpa_ncnn")
  }

  pub fn package_bin(&self) -> PathBuf {
    self.project_root().join("build").join("sherpa_ncnn").join("bin")
  }

  /// What the binary will expect on this host.
  pub fn host_spec(&self) -> ArtifactSpec {
    let env = BuildEnv {
      enable_alsa: self.alsa,
      ..BuildEnv::default()
    };
    let profile = PlatformProfile::detect(&env);
    ArtifactSpec::for_target(&profile, &FeatureFlags::resolve(&profile, &env))
  }

  /// Write one file per expected artifact into `<install root>/<subdir>`,
  /// leaving out `skip`.
  pub fn populate_install_tree(&self, subdir: &str, skip: &[&str]) {
    let dir = self.install_root().join(subdir);
    std::fs::create_dir_all(&dir).unwrap();
    for file_name in self.host_spec().file_names() {
      if skip.contains(&file_name.as_str()) {
        continue;
      }
      std::fs::write(dir.join(&file_name), file_name.as_bytes()).unwrap();
    }
    write_file(&self.install_root().join("include").join("c-api.h"), "header");
    write_file(&self.install_root().join("lib").join("pkgconfig").join("ncnn.pc"), "pc");
  }

  /// A pre-configured Command for the ncnn-bundle binary.
  pub fn bundle_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("ncnn-bundle");
    cmd.current_dir(self.temp.path());
    for var in BUNDLE_VARS {
      cmd.env_remove(var);
    }
    cmd.env(env::PYTHON_EXECUTABLE, "/usr/bin/python3");
    if self.alsa {
      cmd.env(env::ENABLE_ALSA, "1");
    }
    cmd
  }
}

pub fn write_file(path: &Path, content: &str) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

pub fn file_count(dir: &Path) -> usize {
  std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
