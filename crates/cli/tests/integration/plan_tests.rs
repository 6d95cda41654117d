//! Plan command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_runs_nothing() {
  let env = TestEnv::new();

  env
    .bundle_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("cmake"))
    .stdout(predicate::str::contains("sherpa-ncnn-microphone"));

  assert!(!env.project_root().join("build").exists());
}

#[test]
fn plan_json_has_release_directive_first() {
  let env = TestEnv::new();

  let output = env.bundle_cmd().args(["--output", "json", "plan"]).output().unwrap();

  assert!(output.status.success());
  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["config"]["args"][0]["key"], "CMAKE_BUILD_TYPE");
  assert_eq!(plan["config"]["args"][0]["value"], "Release");
}

#[cfg(unix)]
#[test]
fn plan_defaults_parallelism() {
  let env = TestEnv::new();

  env
    .bundle_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("make install -j4"))
    .stderr(predicate::str::contains("defaulting to -j4"));
}

#[cfg(unix)]
#[test]
fn plan_uses_operator_make_args() {
  let env = TestEnv::new();

  env
    .bundle_cmd()
    .env("SHERPA_NCNN_MAKE_ARGS", "-j12")
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("make install -j12"))
    .stdout(predicate::str::contains("-j4").not());
}

#[cfg(unix)]
#[test]
fn plan_quotes_build_dir_with_metacharacters() {
  let env = TestEnv::new();

  env
    .bundle_cmd()
    .args(["plan", "--build-dir", "out&b"])
    .assert()
    .success()
    .stdout(predicate::str::contains("/out&b/temp' && cmake"))
    .stdout(predicate::str::contains("-DCMAKE_INSTALL_PREFIX='"));
}
