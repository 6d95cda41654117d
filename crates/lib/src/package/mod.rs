//! Package assembly.
//!
//! Located artifacts are copied into the flat `bin/` directory of the package,
//! then the install tree is stripped down to what is needed at runtime.

pub mod manifest;
pub mod prune;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub use manifest::{BundleEntry, BundleManifest};
pub use prune::{PRUNED_DIRS, prune_install_tree};

use crate::artifact::LocatedArtifact;
use crate::platform::{OsFamily, Purity};

const STAGING_DIR: &str = ".bin.partial";

#[derive(Debug, Error)]
pub enum AssembleError {
  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to create {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to remove {path}: {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to move {from} to {to}: {source}")]
  Rename {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to hash {path}: {source}")]
  Hash {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write bundle manifest {path}: {source}")]
  WriteManifest {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to serialize bundle manifest: {0}")]
  SerializeManifest(#[from] serde_json::Error),
}

/// Final package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLayout {
  pub root: PathBuf,
}

impl PackageLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Flat directory holding every packaged binary
  pub fn bin_dir(&self) -> PathBuf {
    self.root.join("bin")
  }

  fn staging_dir(&self) -> PathBuf {
    self.root.join(STAGING_DIR)
  }
}

/// Everything the assembler needs besides the artifacts themselves.
#[derive(Debug, Clone)]
pub struct AssemblyInputs {
  pub layout: PackageLayout,
  pub install_root: PathBuf,
  pub os: OsFamily,
  pub purity: Purity,
  /// Distribution tag matching `purity`.
  pub tag: String,
  pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
  pub bin_dir: PathBuf,
  pub copied: Vec<PathBuf>,
  pub pruned: Vec<PathBuf>,
  pub pruned_bytes: u64,
  pub manifest: BundleManifest,
}

/// Copy artifacts into the package, prune the install tree, write the manifest.
///
/// Copies go to a staging directory first; `bin/` only appears once every
/// artifact has been copied.
pub fn assemble(artifacts: &[LocatedArtifact], inputs: &AssemblyInputs) -> Result<AssemblyReport, AssembleError> {
  let bin_dir = inputs.layout.bin_dir();
  let copied = stage_and_swap(artifacts, &inputs.layout)?;
  info!(count = copied.len(), dir = ?bin_dir, "copied artifacts");

  let pruned = prune_install_tree(&inputs.install_root, inputs.os)?;

  let manifest = BundleManifest::collect(artifacts, &bin_dir, inputs)?;
  manifest.write(&inputs.layout.root)?;

  Ok(AssemblyReport {
    bin_dir,
    copied,
    pruned_bytes: pruned.bytes,
    pruned: pruned.paths,
    manifest,
  })
}

fn stage_and_swap(artifacts: &[LocatedArtifact], layout: &PackageLayout) -> Result<Vec<PathBuf>, AssembleError> {
  let staging = layout.staging_dir();
  remove_dir_if_exists(&staging)?;
  fs::create_dir_all(&staging).map_err(|source| AssembleError::CreateDir {
    path: staging.clone(),
    source,
  })?;

  if let Err(e) = copy_all(artifacts, &staging) {
    if let Err(cleanup) = fs::remove_dir_all(&staging) {
      warn!(path = ?staging, error = %cleanup, "failed to remove staging directory");
    }
    return Err(e);
  }

  let bin_dir = layout.bin_dir();
  remove_dir_if_exists(&bin_dir)?;
  fs::rename(&staging, &bin_dir).map_err(|source| AssembleError::Rename {
    from: staging.clone(),
    to: bin_dir.clone(),
    source,
  })?;

  Ok(artifacts.iter().map(|a| bin_dir.join(&a.file_name)).collect())
}

fn copy_all(artifacts: &[LocatedArtifact], dest_dir: &Path) -> Result<(), AssembleError> {
  for artifact in artifacts {
    let dest = dest_dir.join(&artifact.file_name);
    info!(from = ?artifact.path, to = ?dest_dir, "copying artifact");
    fs::copy(&artifact.path, &dest).map_err(|source| AssembleError::Copy {
      from: artifact.path.clone(),
      to: dest,
      source,
    })?;
  }
  Ok(())
}

pub(crate) fn remove_dir_if_exists(path: &Path) -> Result<bool, AssembleError> {
  if !path.is_dir() {
    return Ok(false);
  }
  fs::remove_dir_all(path).map_err(|source| AssembleError::Remove {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(true)
}
