use std::fmt;

use serde::Serialize;

/// CPU architecture families the bundle distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchFamily {
  X86,
  Arm64,
  Other,
}

impl ArchFamily {
  /// Detect the host CPU architecture family
  pub fn current() -> Self {
    Self::from_machine(std::env::consts::ARCH)
  }

  /// Map a machine name (`uname -m` or Rust target arch) to its family
  pub fn from_machine(machine: &str) -> Self {
    match machine.to_ascii_lowercase().as_str() {
      "i386" | "i686" | "x86" | "x86_64" | "amd64" => Self::X86,
      "arm64" | "aarch64" => Self::Arm64,
      _ => Self::Other,
    }
  }

  /// Returns the lowercase string identifier for this architecture family
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::Arm64 => "arm64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for ArchFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
