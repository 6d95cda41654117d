//! Build command integration tests.
//!
//! These use `--skip-build` with a pre-populated install tree, so no native
//! toolchain is needed.

use predicates::prelude::*;

use super::common::{TestEnv, file_count};

#[test]
fn packages_prepopulated_install_tree() {
  let env = TestEnv::new();
  env.populate_install_tree("bin", &[]);

  env
    .bundle_cmd()
    .args(["build", "--skip-build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Package assembled"));

  assert_eq!(file_count(&env.package_bin()), env.host_spec().len());
  assert!(!env.install_root().join("bin").exists());
  assert!(!env.install_root().join("include").exists());
  assert!(!env.install_root().join("lib").join("pkgconfig").exists());
}

#[test]
fn artifacts_in_lib_are_found() {
  let env = TestEnv::new();
  env.populate_install_tree("lib", &[]);

  env.bundle_cmd().args(["build", "--skip-build"]).assert().success();

  assert_eq!(file_count(&env.package_bin()), env.host_spec().len());
}

#[test]
fn missing_artifact_fails_and_names_it() {
  let env = TestEnv::new();
  env.populate_install_tree("bin", &["sherpa-ncnn-microphone", "sherpa-ncnn-microphone.exe"]);

  env
    .bundle_cmd()
    .args(["build", "--skip-build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing artifact sherpa-ncnn-microphone"));

  assert!(!env.package_bin().exists());
}

#[test]
fn json_report_lists_artifacts() {
  let env = TestEnv::new();
  env.populate_install_tree("bin", &[]);

  let output = env
    .bundle_cmd()
    .args(["--output", "json", "build", "--skip-build"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["artifacts"].as_array().unwrap().len(), env.host_spec().len());
  assert_eq!(report["plan"]["version"], "1.2.3");
  assert_eq!(report["built"], false);
}

#[test]
fn bundle_manifest_is_written() {
  let env = TestEnv::new();
  env.populate_install_tree("bin", &[]);

  env.bundle_cmd().args(["build", "--skip-build"]).assert().success();

  let manifest_path = env.package_bin().parent().unwrap().join("bundle.json");
  let manifest: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(manifest_path).unwrap()).unwrap();
  assert_eq!(manifest["version"], "1.2.3");
  assert_eq!(manifest["purity"], "platform_specific");
}

#[cfg(all(target_os = "linux", any(target_arch = "x86_64", target_arch = "x86")))]
mod linux_x86 {
  use super::*;

  #[test]
  fn alsa_adds_one_tool() {
    let env = TestEnv::new().with_alsa();
    env.populate_install_tree("bin", &[]);

    env.bundle_cmd().args(["build", "--skip-build"]).assert().success();

    assert_eq!(file_count(&env.package_bin()), 3);
    assert!(env.package_bin().join("sherpa-ncnn-alsa").is_file());
  }

  #[test]
  fn missing_alsa_tool_copies_nothing() {
    let env = TestEnv::new().with_alsa();
    env.populate_install_tree("bin", &["sherpa-ncnn-alsa"]);

    env
      .bundle_cmd()
      .args(["build", "--skip-build"])
      .assert()
      .failure()
      .stderr(predicate::str::contains("sherpa-ncnn-alsa"));

    assert!(!env.package_bin().exists());
  }
}
