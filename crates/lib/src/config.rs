//! Operator-supplied build settings.
//!
//! Everything the pipeline takes from the process environment is read here,
//! once, into a [`BuildEnv`]. Later stages only see this value, so they can be
//! driven with fixed inputs in tests.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::consts::env;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildEnv {
  /// Raw CMake directives, passed through untouched.
  pub cmake_args: Option<String>,
  /// Extra arguments for the build tool, appended after the install target.
  pub make_args: Option<String>,
  /// The ambient build system's own flags (`MAKEFLAGS`). Read only.
  pub system_make_args: Option<String>,
  /// Marks the distributable as platform independent where allowed.
  pub packaging_build: bool,
  /// Operator asked for the ALSA audio tool.
  pub enable_alsa: bool,
  /// Interpreter handed to CMake for the Python binding.
  pub python: Option<PathBuf>,
}

impl BuildEnv {
  /// Load settings from the current process environment.
  ///
  /// Empty variables count as unset.
  pub fn from_env() -> Self {
    let python = var(env::PYTHON_EXECUTABLE).map(PathBuf::from).or_else(find_python);

    let loaded = Self {
      cmake_args: var(env::CMAKE_ARGS),
      make_args: var(env::MAKE_ARGS),
      system_make_args: var(env::SYSTEM_MAKE_ARGS),
      packaging_build: var(env::PACKAGING_BUILD).is_some(),
      enable_alsa: var(env::ENABLE_ALSA).is_some(),
      python,
    };

    debug!(env = ?loaded, "loaded build environment");
    loaded
  }

  /// Replace the interpreter, e.g. from a command-line flag.
  pub fn with_python(mut self, python: Option<PathBuf>) -> Self {
    if python.is_some() {
      self.python = python;
    }
    self
  }
}

fn var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn find_python() -> Option<PathBuf> {
  which::which("python3").or_else(|_| which::which("python")).ok()
}
