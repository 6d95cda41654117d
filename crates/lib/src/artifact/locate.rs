//! Finding build outputs in the install tree.
//!
//! Different platforms and CMake configurations install executables and shared
//! libraries to different places. Each artifact is probed in a fixed list of
//! candidate directories and the first regular file wins.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::{ArtifactName, ArtifactSpec};

/// A directory, relative to the install root, where artifacts may live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateDir {
  /// A named subdirectory of the install root.
  Subdir(&'static str),
  /// The directory containing the install root.
  Parent,
}

impl CandidateDir {
  pub fn resolve(&self, install_root: &Path) -> PathBuf {
    match self {
      Self::Subdir(name) => install_root.join(name),
      Self::Parent => install_root.join(".."),
    }
  }
}

/// Search order used unless a caller supplies its own.
pub const DEFAULT_CANDIDATES: &[CandidateDir] =
  &[CandidateDir::Subdir("bin"), CandidateDir::Subdir("lib"), CandidateDir::Parent];

#[derive(Debug, Error)]
pub enum LocateError {
  #[error("missing artifact {name}; tried: {}", display_paths(.tried))]
  Missing { name: ArtifactName, tried: Vec<PathBuf> },

  #[error("failed to resolve {path}: {source}")]
  Resolve {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

/// An artifact resolved to an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedArtifact {
  pub name: ArtifactName,
  pub file_name: String,
  pub path: PathBuf,
}

/// Read-only lookup over an install tree.
#[derive(Debug, Clone)]
pub struct Locator {
  install_root: PathBuf,
  candidates: Vec<CandidateDir>,
}

impl Locator {
  pub fn new(install_root: impl Into<PathBuf>) -> Self {
    Self {
      install_root: install_root.into(),
      candidates: DEFAULT_CANDIDATES.to_vec(),
    }
  }

  /// Replace the search order.
  pub fn with_candidates(mut self, candidates: impl IntoIterator<Item = CandidateDir>) -> Self {
    self.candidates = candidates.into_iter().collect();
    self
  }

  pub fn candidates(&self) -> &[CandidateDir] {
    &self.candidates
  }

  /// Resolve every artifact in `spec`, in order.
  ///
  /// Stops at the first artifact that is missing from every candidate.
  pub fn locate(&self, spec: &ArtifactSpec) -> Result<Vec<LocatedArtifact>, LocateError> {
    let located = spec
      .iter()
      .map(|name| self.locate_one(name, &name.file_name(spec.os)))
      .collect::<Result<Vec<_>, _>>()?;

    info!(count = located.len(), root = ?self.install_root, "located all artifacts");
    Ok(located)
  }

  fn locate_one(&self, name: &ArtifactName, file_name: &str) -> Result<LocatedArtifact, LocateError> {
    let mut tried = Vec::with_capacity(self.candidates.len());

    for candidate in &self.candidates {
      let path = candidate.resolve(&self.install_root).join(file_name);
      debug!(artifact = %name, path = ?path, "probing candidate");

      if path.is_file() {
        let path = dunce::canonicalize(&path).map_err(|source| LocateError::Resolve { path, source })?;
        return Ok(LocatedArtifact {
          name: name.clone(),
          file_name: file_name.to_string(),
          path,
        });
      }
      tried.push(path);
    }

    Err(LocateError::Missing {
      name: name.clone(),
      tried,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::OsFamily;
  use std::fs;
  use tempfile::TempDir;

  fn spec(names: &[&str]) -> ArtifactSpec {
    ArtifactSpec {
      os: OsFamily::Linux,
      names: names.iter().map(|n| ArtifactName::new(*n)).collect(),
    }
  }

  /// Creates `<tmp>/lib/pkg` as the install root.
  fn install_tree() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("lib").join("pkg");
    fs::create_dir_all(&root).unwrap();
    (temp, root)
  }

  fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"binary").unwrap();
  }

  #[test]
  fn finds_artifact_in_bin() {
    let (_temp, root) = install_tree();
    touch(&root.join("bin").join("sherpa-ncnn"));

    let located = Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert_eq!(located.len(), 1);
    assert_eq!(located[0].file_name, "sherpa-ncnn");
    assert!(located[0].path.is_absolute());
    assert!(located[0].path.ends_with("bin/sherpa-ncnn"));
  }

  #[test]
  fn falls_through_to_lib() {
    let (_temp, root) = install_tree();
    fs::create_dir_all(root.join("bin")).unwrap();
    touch(&root.join("lib").join("sherpa-ncnn"));

    let located = Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert!(located[0].path.ends_with("lib/pkg/lib/sherpa-ncnn"));
  }

  #[test]
  fn falls_through_to_parent() {
    let (temp, root) = install_tree();
    touch(&temp.path().join("lib").join("sherpa-ncnn"));

    let located = Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert_eq!(located[0].path, dunce::canonicalize(temp.path().join("lib").join("sherpa-ncnn")).unwrap());
  }

  #[test]
  fn bin_takes_priority_over_lib() {
    let (_temp, root) = install_tree();
    touch(&root.join("bin").join("sherpa-ncnn"));
    touch(&root.join("lib").join("sherpa-ncnn"));

    let located = Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert!(located[0].path.ends_with("bin/sherpa-ncnn"));
  }

  #[test]
  fn directories_do_not_count_as_artifacts() {
    let (_temp, root) = install_tree();
    fs::create_dir_all(root.join("bin").join("sherpa-ncnn")).unwrap();
    touch(&root.join("lib").join("sherpa-ncnn"));

    let located = Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert!(located[0].path.ends_with("lib/sherpa-ncnn"));
  }

  #[test]
  fn missing_artifact_names_it_and_lists_every_candidate() {
    let (_temp, root) = install_tree();
    touch(&root.join("bin").join("sherpa-ncnn"));

    let err = Locator::new(&root)
      .locate(&spec(&["sherpa-ncnn", "sherpa-ncnn-alsa"]))
      .unwrap_err();

    match &err {
      LocateError::Missing { name, tried } => {
        assert_eq!(name.as_str(), "sherpa-ncnn-alsa");
        assert_eq!(tried.len(), DEFAULT_CANDIDATES.len());
        assert_eq!(tried[0], root.join("bin").join("sherpa-ncnn-alsa"));
        assert_eq!(tried[1], root.join("lib").join("sherpa-ncnn-alsa"));
        assert_eq!(tried[2], root.join("..").join("sherpa-ncnn-alsa"));
      }
      other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("sherpa-ncnn-alsa"));
  }

  #[test]
  fn extra_candidates_extend_the_search() {
    let (_temp, root) = install_tree();
    touch(&root.join("lib64").join("sherpa-ncnn"));

    let mut candidates = DEFAULT_CANDIDATES.to_vec();
    candidates.push(CandidateDir::Subdir("lib64"));

    let locator = Locator::new(&root).with_candidates(candidates);
    assert_eq!(locator.candidates().len(), 4);
    let located = locator.locate(&spec(&["sherpa-ncnn"])).unwrap();
    assert!(located[0].path.ends_with("lib64/sherpa-ncnn"));
  }

  #[test]
  fn install_tree_is_not_modified() {
    let (temp, root) = install_tree();
    touch(&root.join("bin").join("sherpa-ncnn"));

    let before: Vec<_> = walkdir::WalkDir::new(temp.path())
      .sort_by_file_name()
      .into_iter()
      .map(|e| e.unwrap().into_path())
      .collect();
    Locator::new(&root).locate(&spec(&["sherpa-ncnn"])).unwrap();
    let after: Vec<_> = walkdir::WalkDir::new(temp.path())
      .sort_by_file_name()
      .into_iter()
      .map(|e| e.unwrap().into_path())
      .collect();

    assert_eq!(before, after);
  }
}
