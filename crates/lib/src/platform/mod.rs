pub mod arch;
pub mod os;

use std::fmt;

use serde::Serialize;

pub use arch::ArchFamily;
pub use os::OsFamily;

use crate::config::BuildEnv;

/// Host platform as seen by the packaging pipeline.
///
/// Computed once per run and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformProfile {
  pub os: OsFamily,
  pub arch: ArchFamily,
  /// Set when the packaging flag is present in the environment.
  pub is_packaging_build: bool,
}

impl PlatformProfile {
  pub fn new(os: OsFamily, arch: ArchFamily, is_packaging_build: bool) -> Self {
    Self {
      os,
      arch,
      is_packaging_build,
    }
  }

  /// Detect the host platform.
  ///
  /// OS and architecture come from the running binary's host identification; the
  /// packaging mode comes from the already-loaded environment.
  pub fn detect(env: &BuildEnv) -> Self {
    Self::new(OsFamily::current(), ArchFamily::current(), env.packaging_build)
  }

  pub fn is_windows(&self) -> bool {
    self.os == OsFamily::Windows
  }

  /// Platform tag used to label platform-specific bundles (e.g. "linux-x86")
  pub fn tag(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for PlatformProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tag())
  }
}

/// How the final distributable classifies itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purity {
  /// Not tied to a platform or architecture.
  Pure,
  /// Tagged with the platform it was built on.
  PlatformSpecific,
}

impl Purity {
  /// Packaging builds are pure everywhere except macOS.
  pub fn for_profile(profile: &PlatformProfile) -> Self {
    if profile.is_packaging_build && profile.os != OsFamily::MacOs {
      Self::Pure
    } else {
      Self::PlatformSpecific
    }
  }

  /// Distribution tag for a bundle built on `profile`
  pub fn tag(&self, profile: &PlatformProfile) -> String {
    match self {
      Self::Pure => "any".to_string(),
      Self::PlatformSpecific => profile.tag(),
    }
  }
}
