//! Platform-specific shapes of the configure + build + install invocation.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::{BuildConfig, BuildError, BuildPaths, ShellFlavor};
use crate::platform::PlatformProfile;

/// Which part of the native build a step performs. Decides the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStage {
  Configure,
  BuildInstall,
  /// Configure, build and install in one shell script.
  Composite,
}

impl fmt::Display for BuildStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Configure => "configure",
      Self::BuildInstall => "build-install",
      Self::Composite => "composite",
    };
    write!(f, "{}", s)
  }
}

/// One external invocation, as shell command text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStep {
  pub stage: BuildStage,
  pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeBuildStrategy {
  /// `cd`, `cmake`, `make install` chained in one invocation.
  Composite,
  /// `cmake` generate and `cmake --build --target install` as separate invocations.
  TwoStep,
}

impl NativeBuildStrategy {
  pub fn for_profile(profile: &PlatformProfile) -> Self {
    if profile.is_windows() { Self::TwoStep } else { Self::Composite }
  }

  /// Shell the planned command text is written for.
  pub fn shell(&self) -> ShellFlavor {
    match self {
      Self::Composite => ShellFlavor::Posix,
      Self::TwoStep => ShellFlavor::Cmd,
    }
  }

  /// Command lines for this strategy. Nothing is executed.
  ///
  /// Fails only when a path or value cannot be quoted for the target shell.
  pub fn plan(&self, config: &BuildConfig, paths: &BuildPaths) -> Result<Vec<BuildStep>, BuildError> {
    let shell = self.shell();
    let scratch = quote_path(shell, &paths.scratch_dir)?;
    let root = quote_path(shell, &paths.project_root)?;
    let args = config.args_for_shell(shell)?;

    Ok(match self {
      Self::TwoStep => vec![
        BuildStep {
          stage: BuildStage::Configure,
          command: format!("cmake {args} -B {scratch} -S {root}"),
        },
        BuildStep {
          stage: BuildStage::BuildInstall,
          command: format!("cmake --build {scratch} --target install --config Release -- -m"),
        },
      ],
      Self::Composite => {
        let mut command = format!("cd {scratch} && cmake {args} {root} && make install");
        for arg in &config.tool_args {
          command.push(' ');
          command.push_str(&shell.quote(arg)?);
        }
        vec![BuildStep {
          stage: BuildStage::Composite,
          command,
        }]
      }
    })
  }
}

fn quote_path(shell: ShellFlavor, path: &Path) -> Result<String, BuildError> {
  let text = path.display().to_string();
  Ok(shell.quote(&text)?.into_owned())
}
