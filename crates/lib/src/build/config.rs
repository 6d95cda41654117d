//! CMake configuration assembly.
//!
//! Operator directives come first and are never reordered or deduplicated;
//! CMake resolves repeated keys itself, so ordering is part of the contract.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{BuildError, ShellFlavor};
use crate::config::BuildEnv;
use crate::consts::DEFAULT_JOBS;
use crate::consts::env::MAKE_ARGS;
use crate::platform::PlatformProfile;

const RELEASE_DIRECTIVE: (&str, &str) = ("CMAKE_BUILD_TYPE", "Release");

/// Directives every bundle needs, in the order they are appended.
const FEATURE_DIRECTIVES: &[(&str, &str)] = &[
  ("SHERPA_NCNN_ENABLE_BINARY", "ON"),
  ("SHERPA_NCNN_ENABLE_C_API", "ON"),
  ("SHERPA_NCNN_ENABLE_PYTHON", "ON"),
  ("SHERPA_NCNN_ENABLE_PORTAUDIO", "ON"),
  ("SHERPA_NCNN_ENABLE_GENERATE_INT8_SCALE_TABLE", "OFF"),
];

const INTERPRETER_KEY: &str = "PYTHON_EXECUTABLE";

/// One argument of the configure command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigArg {
  /// `-D<key>=<value>`
  Define { key: String, value: String },
  /// Anything else, passed through verbatim.
  Raw { text: String },
}

impl ConfigArg {
  pub fn define(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self::Define {
      key: key.into(),
      value: value.into(),
    }
  }

  /// Classify a single token from an operator-supplied string.
  pub fn parse(token: &str) -> Self {
    token
      .strip_prefix("-D")
      .and_then(|rest| rest.split_once('='))
      .map(|(key, value)| Self::define(key, value))
      .unwrap_or_else(|| Self::Raw { text: token.to_string() })
  }

  pub fn mentions(&self, needle: &str) -> bool {
    match self {
      Self::Define { key, value } => key.contains(needle) || value.contains(needle),
      Self::Raw { text } => text.contains(needle),
    }
  }

  /// Render as one word for `shell`. Only the value of a define is quoted, so
  /// plain directives read the same as their `Display` form.
  pub fn to_shell(&self, shell: ShellFlavor) -> Result<String, BuildError> {
    Ok(match self {
      Self::Define { key, value } => format!("-D{}={}", key, shell.quote(value)?),
      Self::Raw { text } => shell.quote(text)?.into_owned(),
    })
  }
}

impl fmt::Display for ConfigArg {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Define { key, value } => write!(f, "-D{}={}", key, value),
      Self::Raw { text } => write!(f, "{}", text),
    }
  }
}

/// Where the build tool's parallelism comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
  /// The operator's build-tool arguments.
  User,
  /// The ambient build system's flags, left for the build tool to read.
  Ambient,
  /// The build tool's own switch (MSBuild `-m`). Operator build-tool
  /// arguments are make flags and are not passed to MSBuild.
  Native,
  /// Nothing was set; `-j<n>` is added.
  Default(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  /// Configure arguments in the order they are passed.
  pub args: Vec<ConfigArg>,
  /// Extra `make` arguments, appended after the install target. Always empty on Windows.
  pub tool_args: Vec<String>,
  pub parallelism: Parallelism,
}

impl BuildConfig {
  pub fn assemble(profile: &PlatformProfile, env: &BuildEnv, install_root: &Path) -> Self {
    let mut args: Vec<ConfigArg> = match &env.cmake_args {
      Some(raw) => raw.split_whitespace().map(ConfigArg::parse).collect(),
      None => vec![ConfigArg::define(RELEASE_DIRECTIVE.0, RELEASE_DIRECTIVE.1)],
    };

    args.extend(FEATURE_DIRECTIVES.iter().map(|(k, v)| ConfigArg::define(*k, *v)));
    args.push(ConfigArg::define("BUILD_SHARED_LIBS", "ON"));
    args.push(ConfigArg::define("CMAKE_INSTALL_PREFIX", install_root.display().to_string()));

    if !args.iter().any(|a| a.mentions(INTERPRETER_KEY)) {
      match &env.python {
        Some(python) => {
          info!(python = %python.display(), "setting {}", INTERPRETER_KEY);
          args.push(ConfigArg::define(INTERPRETER_KEY, python.display().to_string()));
        }
        None => warn!("no Python interpreter found; CMake will pick one itself"),
      }
    }

    let mut tool_args: Vec<String> = Vec::new();

    let parallelism = if profile.is_windows() {
      if let Some(raw) = &env.make_args {
        debug!(args = %raw, "ignoring {} on Windows; MSBuild runs with -m", MAKE_ARGS);
      }
      Parallelism::Native
    } else if let Some(raw) = &env.make_args {
      tool_args.extend(raw.split_whitespace().map(str::to_string));
      Parallelism::User
    } else if env.system_make_args.is_some() {
      Parallelism::Ambient
    } else {
      warn!(
        "no build parallelism set; defaulting to -j{}. For faster builds set {}=\"-j\"",
        DEFAULT_JOBS,
        MAKE_ARGS
      );
      tool_args.push(format!("-j{}", DEFAULT_JOBS));
      Parallelism::Default(DEFAULT_JOBS)
    };

    Self {
      args,
      tool_args,
      parallelism,
    }
  }

  /// Configure arguments joined for a `shell` command line.
  pub fn args_for_shell(&self, shell: ShellFlavor) -> Result<String, BuildError> {
    let words = self
      .args
      .iter()
      .map(|arg| arg.to_shell(shell))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(words.join(" "))
  }
}
