//! `bundle.json`: what was packaged and how the bundle classifies itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AssembleError, AssemblyInputs};
use crate::artifact::LocatedArtifact;
use crate::consts::{BUNDLE_MANIFEST, PACKAGE_DIR_NAME};
use crate::platform::Purity;
use crate::util::hash::hash_file;

/// Manifest format version.
const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
  /// Logical artifact name.
  pub name: String,
  /// File name inside `bin/`.
  pub file: String,
  pub size: u64,
  pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleManifest {
  pub manifest_version: u32,
  pub package: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  pub tag: String,
  pub purity: Purity,
  pub artifacts: Vec<BundleEntry>,
}

impl BundleManifest {
  /// Describe the copies in `bin_dir`, in artifact order.
  pub fn collect(
    artifacts: &[LocatedArtifact],
    bin_dir: &Path,
    inputs: &AssemblyInputs,
  ) -> Result<Self, AssembleError> {
    let entries = artifacts
      .iter()
      .map(|artifact| {
        let path = bin_dir.join(&artifact.file_name);
        let hash_err = |source| AssembleError::Hash {
          path: path.clone(),
          source,
        };
        let size = fs::metadata(&path).map_err(hash_err)?.len();
        let sha256 = hash_file(&path).map_err(hash_err)?;
        Ok(BundleEntry {
          name: artifact.name.to_string(),
          file: artifact.file_name.clone(),
          size,
          sha256: sha256.0,
        })
      })
      .collect::<Result<Vec<_>, AssembleError>>()?;

    Ok(Self {
      manifest_version: MANIFEST_VERSION,
      package: PACKAGE_DIR_NAME.to_string(),
      version: inputs.version.clone(),
      tag: inputs.tag.clone(),
      purity: inputs.purity,
      artifacts: entries,
    })
  }

  /// Write to `<package_root>/bundle.json`.
  pub fn write(&self, package_root: &Path) -> Result<PathBuf, AssembleError> {
    let path = package_root.join(BUNDLE_MANIFEST);
    let content = serde_json::to_string_pretty(self)?;
    fs::write(&path, format!("{}\n", content)).map_err(|source| AssembleError::WriteManifest {
      path: path.clone(),
      source,
    })?;
    Ok(path)
  }
}
