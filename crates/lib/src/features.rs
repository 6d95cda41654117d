//! Optional capabilities and their platform gating.

use serde::Serialize;

use crate::config::BuildEnv;
use crate::platform::{ArchFamily, OsFamily, PlatformProfile};

/// A capability the operator may ask for, which the platform may refuse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureToggle {
  pub requested: bool,
  pub supported: bool,
}

impl FeatureToggle {
  pub fn enabled(&self) -> bool {
    self.requested && self.supported
  }

  /// Requested but refused by the platform.
  pub fn suppressed(&self) -> bool {
    self.requested && !self.supported
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
  /// ALSA audio I/O tool.
  pub alsa: FeatureToggle,
}

impl FeatureFlags {
  pub fn resolve(profile: &PlatformProfile, env: &BuildEnv) -> Self {
    Self {
      alsa: FeatureToggle {
        requested: env.enable_alsa,
        supported: alsa_supported(profile),
      },
    }
  }
}

fn alsa_supported(profile: &PlatformProfile) -> bool {
  profile.os == OsFamily::Linux && matches!(profile.arch, ArchFamily::X86 | ArchFamily::Arm64)
}
