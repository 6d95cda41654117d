//! Expected build outputs.
//!
//! [`ArtifactSpec`] is the one place that decides which files must exist after
//! the native build. Everything downstream consumes it instead of re-deriving
//! platform facts.

pub mod locate;

use std::fmt;

use serde::Serialize;

pub use locate::{CandidateDir, DEFAULT_CANDIDATES, LocateError, LocatedArtifact, Locator};

use crate::features::FeatureFlags;
use crate::platform::{OsFamily, PlatformProfile};

/// Extensions that already mark a name as a native library file.
const LIBRARY_EXTENSIONS: &[&str] = &[".dll", ".lib", ".so", ".dylib"];

const BASE_TOOLS: &[&str] = &["sherpa-ncnn", "sherpa-ncnn-microphone"];
const ALSA_TOOL: &str = "sherpa-ncnn-alsa";
/// Runtime libraries Windows needs next to the executables.
const WINDOWS_LIBRARIES: &[&str] = &[
  "kaldi-native-fbank-core.dll",
  "sherpa-ncnn-c-api.dll",
  "sherpa-ncnn-core.dll",
  "sherpa-ncnn-portaudio.dll",
  "ncnn.dll",
];

/// Logical artifact name, not yet a file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactName(pub String);

impl ArtifactName {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_library(&self) -> bool {
    LIBRARY_EXTENSIONS.iter().any(|ext| self.0.ends_with(ext))
  }

  /// File name of this artifact on `os`.
  ///
  /// Executables get the platform suffix; library names are used as-is.
  pub fn file_name(&self, os: OsFamily) -> String {
    if self.is_library() {
      self.0.clone()
    } else {
      format!("{}{}", self.0, os.exe_suffix())
    }
  }
}

impl fmt::Display for ArtifactName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Ordered set of artifacts a successful build must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSpec {
  pub os: OsFamily,
  pub names: Vec<ArtifactName>,
}

impl ArtifactSpec {
  pub fn for_target(profile: &PlatformProfile, features: &FeatureFlags) -> Self {
    let mut names: Vec<ArtifactName> = BASE_TOOLS.iter().map(|n| ArtifactName::new(*n)).collect();

    if features.alsa.enabled() {
      names.push(ArtifactName::new(ALSA_TOOL));
    }

    if profile.is_windows() {
      names.extend(WINDOWS_LIBRARIES.iter().map(|n| ArtifactName::new(*n)));
    }

    Self { os: profile.os, names }
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ArtifactName> {
    self.names.iter()
  }

  /// File names, in artifact order
  pub fn file_names(&self) -> Vec<String> {
    self.names.iter().map(|n| n.file_name(self.os)).collect()
  }
}
