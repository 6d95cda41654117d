//! Running the native build.
//!
//! Each step runs through the platform shell, inherits stdio so compiler output
//! streams to the operator, and is awaited to completion with no timeout. The
//! first non-zero exit aborts the remaining steps.

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use super::{BuildError, BuildPaths, BuildStage, BuildStep};

#[derive(Debug, Clone, Default)]
pub struct BuildInvoker {
  /// Shell override; defaults to `/bin/sh` or `cmd.exe`.
  shell: Option<String>,
}

impl BuildInvoker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_shell(shell: impl Into<String>) -> Self {
    Self {
      shell: Some(shell.into()),
    }
  }

  /// Create the working directories and run `steps` in order.
  pub fn run(&self, steps: &[BuildStep], paths: &BuildPaths) -> Result<(), BuildError> {
    create_dir(&paths.scratch_dir)?;
    create_dir(&paths.install_root)?;

    let script = steps.iter().map(|s| s.command.as_str()).collect::<Vec<_>>().join("\n");
    info!("build command is:\n{}", script);

    for step in steps {
      self.run_step(step)?;
    }

    Ok(())
  }

  fn run_step(&self, step: &BuildStep) -> Result<(), BuildError> {
    let (shell, shell_args) = get_shell(self.shell.as_deref());

    info!(stage = %step.stage, command = %step.command, "running build step");
    debug!(shell = %shell, "spawning process");

    let status = Command::new(&shell)
      .args(&shell_args)
      .arg(&step.command)
      .status()
      .map_err(|source| BuildError::Spawn {
        command: step.command.clone(),
        source,
      })?;

    if status.success() {
      return Ok(());
    }

    let code = status.code();
    Err(match step.stage {
      BuildStage::Configure => BuildError::ConfigureFailed { code },
      BuildStage::BuildInstall => BuildError::InstallFailed { code },
      BuildStage::Composite => BuildError::Failed { code },
    })
  }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
  fs::create_dir_all(path).map_err(|source| BuildError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}

/// Shell program and the flag that makes it run a command string.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    ("cmd.exe".to_string(), vec!["/C".to_string()])
  }
}
