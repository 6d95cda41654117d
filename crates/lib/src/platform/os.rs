use std::fmt;

use serde::Serialize;

/// Operating system families the bundle distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
  Windows,
  MacOs,
  Linux,
  Other,
}

impl OsFamily {
  /// Detect the host operating system family
  pub fn current() -> Self {
    Self::from_identifier(std::env::consts::OS)
  }

  /// Map a system identifier to its family.
  ///
  /// Accepts Rust target names (`macos`) as well as `uname -s` style names (`Darwin`).
  pub fn from_identifier(id: &str) -> Self {
    match id.to_ascii_lowercase().as_str() {
      "windows" => Self::Windows,
      "macos" | "darwin" => Self::MacOs,
      "linux" => Self::Linux,
      _ => Self::Other,
    }
  }

  /// Returns the lowercase string identifier for this OS family
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Linux => "linux",
      Self::Other => "other",
    }
  }

  /// Suffix appended to executable names on this OS
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      _ => "",
    }
  }
}

impl fmt::Display for OsFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
