/// Name of the Python package directory inside the build output.
pub const PACKAGE_DIR_NAME: &str = "sherpa_ncnn";

/// Default build-tool parallelism when neither the operator nor the ambient
/// build system asks for one.
pub const DEFAULT_JOBS: u32 = 4;

/// Where operators are sent when the native build fails.
pub const ISSUE_URL: &str = "https://github.com/k2-fsa/sherpa-ncnn/issues/new";

/// Manifest written at the root of every assembled package.
pub const BUNDLE_MANIFEST: &str = "bundle.json";

/// Environment variables read by [`crate::config::BuildEnv`].
pub mod env {
  pub const CMAKE_ARGS: &str = "SHERPA_NCNN_CMAKE_ARGS";
  pub const MAKE_ARGS: &str = "SHERPA_NCNN_MAKE_ARGS";
  pub const SYSTEM_MAKE_ARGS: &str = "MAKEFLAGS";
  pub const PACKAGING_BUILD: &str = "SHERPA_NCNN_IS_FOR_PYPI";
  pub const ENABLE_ALSA: &str = "SHERPA_NCNN_ENABLE_ALSA";
  pub const PYTHON_EXECUTABLE: &str = "PYTHON_EXECUTABLE";
}
