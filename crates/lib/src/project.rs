//! Facts read from the CMake project itself.

use std::fs;
use std::path::Path;

use tracing::debug;

const VERSION_VARIABLE: &str = "SHERPA_NCNN_VERSION";

/// Version declared in `CMakeLists.txt` by `set(SHERPA_NCNN_VERSION "x.y.z")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion(pub String);

impl ProjectVersion {
  /// Returns `None` when the file or the `set(...)` line is missing.
  pub fn read(project_root: &Path) -> Option<Self> {
    let path = project_root.join("CMakeLists.txt");
    match fs::read_to_string(&path) {
      Ok(content) => Self::parse(&content),
      Err(e) => {
        debug!(path = ?path, error = %e, "cannot read CMakeLists.txt");
        None
      }
    }
  }

  pub fn parse(content: &str) -> Option<Self> {
    content.lines().find_map(|line| {
      let args = line.trim().strip_prefix("set(")?.strip_suffix(')')?;
      let value = args.trim().strip_prefix(VERSION_VARIABLE)?;
      // Guard against SHERPA_NCNN_VERSION_MAJOR and friends.
      if !value.starts_with(char::is_whitespace) {
        return None;
      }
      let value = value.trim().trim_matches('"');
      (!value.is_empty()).then(|| Self(value.to_string()))
    })
  }
}

impl std::fmt::Display for ProjectVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}
