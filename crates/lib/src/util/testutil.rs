//! Test utilities for ncnn-bundle-lib.
//!
//! Build steps are shell command text, so these return command strings for the
//! platform shell the invoker uses.

use std::path::Path;

use crate::artifact::{ArtifactSpec, LocatedArtifact};

/// A command that exits with `code`.
#[cfg(unix)]
pub fn exit_with(code: i32) -> String {
  format!("exit {}", code)
}

#[cfg(windows)]
pub fn exit_with(code: i32) -> String {
  format!("exit /b {}", code)
}

/// A command that creates an empty file at `path`.
#[cfg(unix)]
pub fn touch_cmd(path: &Path) -> String {
  format!(": > '{}'", path.display())
}

#[cfg(windows)]
pub fn touch_cmd(path: &Path) -> String {
  format!("type nul > \"{}\"", path.display())
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &[u8]) {
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
}

/// Populate `dir` with one file per artifact in `spec`.
pub fn populate(dir: &Path, spec: &ArtifactSpec) {
  for file_name in spec.file_names() {
    write_file(&dir.join(&file_name), file_name.as_bytes());
  }
}

/// Artifacts located in `dir` without going through the locator.
pub fn located_in(dir: &Path, spec: &ArtifactSpec) -> Vec<LocatedArtifact> {
  spec
    .iter()
    .map(|name| {
      let file_name = name.file_name(spec.os);
      LocatedArtifact {
        name: name.clone(),
        path: dir.join(&file_name),
        file_name,
      }
    })
    .collect()
}
