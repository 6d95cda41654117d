//! Native build orchestration.
//!
//! - `config`: merge operator overrides with the directives every bundle needs
//! - `strategy`: turn a configuration into the command lines for this platform
//! - `quote`: make generated values single literal words for the step's shell
//! - `invoke`: run those command lines and map exit status to errors

pub mod config;
pub mod invoke;
pub mod quote;
pub mod strategy;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub use config::{BuildConfig, ConfigArg, Parallelism};
pub use invoke::BuildInvoker;
pub use quote::ShellFlavor;
pub use strategy::{BuildStage, BuildStep, NativeBuildStrategy};

use crate::consts::{ISSUE_URL, PACKAGE_DIR_NAME};

/// Directories a single packaging run works in.
///
/// Must not be shared by two builds running at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPaths {
  /// CMake project containing `CMakeLists.txt`.
  pub project_root: PathBuf,
  /// CMake binary directory.
  pub scratch_dir: PathBuf,
  /// `CMAKE_INSTALL_PREFIX`.
  pub install_root: PathBuf,
  /// Final package directory.
  pub package_root: PathBuf,
}

impl BuildPaths {
  /// Conventional layout under a single build directory:
  /// `temp/` for CMake, `lib/sherpa_ncnn/` for the install tree and
  /// `sherpa_ncnn/` for the package.
  pub fn under(project_root: impl Into<PathBuf>, build_dir: &Path) -> Self {
    Self {
      project_root: project_root.into(),
      scratch_dir: build_dir.join("temp"),
      install_root: build_dir.join("lib").join(PACKAGE_DIR_NAME),
      package_root: build_dir.join(PACKAGE_DIR_NAME),
    }
  }
}

const REMEDIATION: &str = "\nPlease check the error message above.\nYou can ask for help by creating an issue on GitHub:\n\t";

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to configure the native build (exit code {code:?}){}{}", REMEDIATION, ISSUE_URL)]
  ConfigureFailed { code: Option<i32> },

  #[error("failed to build and install the native build (exit code {code:?}){}{}", REMEDIATION, ISSUE_URL)]
  InstallFailed { code: Option<i32> },

  #[error("native build failed (exit code {code:?}){}{}", REMEDIATION, ISSUE_URL)]
  Failed { code: Option<i32> },

  #[error("cannot quote `{value}` for {shell}: {reason}")]
  Unquotable {
    value: String,
    shell: ShellFlavor,
    reason: &'static str,
  },

  #[error("failed to start `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to create {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
