//! Install-tree normalization.
//!
//! Only the well-known directory names below are ever deleted. Paths are
//! always built from the install root, never from operator input.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::{AssembleError, remove_dir_if_exists};
use crate::platform::OsFamily;

/// Build-time metadata CMake installs that the package never needs.
pub const PRUNED_DIRS: &[&[&str]] = &[
  &["include"],
  &["lib", "cmake"],
  &["lib", "pkgconfig"],
  &["lib64", "cmake"],
  &["lib64", "pkgconfig"],
];

#[derive(Debug, Default)]
pub struct PruneResult {
  pub paths: Vec<PathBuf>,
  pub bytes: u64,
}

/// Remove metadata directories, then the top-level `bin` (and `lib` on Windows)
/// whose contents now live in the package.
pub fn prune_install_tree(install_root: &Path, os: OsFamily) -> Result<PruneResult, AssembleError> {
  let mut targets: Vec<PathBuf> = PRUNED_DIRS
    .iter()
    .map(|parts| parts.iter().fold(install_root.to_path_buf(), |p, part| p.join(part)))
    .collect();

  targets.push(install_root.join("bin"));
  if os == OsFamily::Windows {
    targets.push(install_root.join("lib"));
  }

  let mut result = PruneResult::default();
  for target in targets {
    let size = dir_size(&target);
    if remove_dir_if_exists(&target)? {
      debug!(path = ?target, bytes = size, "removed");
      result.bytes += size;
      result.paths.push(target);
    }
  }

  info!(removed = result.paths.len(), bytes = result.bytes, "pruned install tree");
  Ok(result)
}

fn dir_size(path: &Path) -> u64 {
  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter_map(|e| e.metadata().ok())
    .map(|m| m.len())
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::write_file;
  use tempfile::TempDir;

  #[test]
  fn removes_lib64_metadata() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(&root.join("lib64").join("cmake").join("x.cmake"), b"x");
    write_file(&root.join("lib64").join("pkgconfig").join("x.pc"), b"x");
    write_file(&root.join("lib64").join("libx.so"), b"x");

    let result = prune_install_tree(root, OsFamily::Linux).unwrap();

    assert_eq!(result.paths.len(), 2);
    assert!(root.join("lib64").join("libx.so").is_file());
  }

  #[test]
  fn missing_directories_are_skipped() {
    let temp = TempDir::new().unwrap();
    let result = prune_install_tree(temp.path(), OsFamily::Linux).unwrap();
    assert!(result.paths.is_empty());
    assert_eq!(result.bytes, 0);
  }

  #[test]
  fn lib_is_kept_off_windows_and_removed_on_windows() {
    let temp = TempDir::new().unwrap();
    let linux_root = temp.path().join("linux");
    let windows_root = temp.path().join("windows");
    for root in [&linux_root, &windows_root] {
      write_file(&root.join("lib").join("sherpa-ncnn-core.lib"), b"import lib");
    }

    prune_install_tree(&linux_root, OsFamily::Linux).unwrap();
    prune_install_tree(&windows_root, OsFamily::Windows).unwrap();

    assert!(linux_root.join("lib").is_dir());
    assert!(!windows_root.join("lib").exists());
  }

  #[test]
  fn files_named_like_targets_are_left_alone() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("include"), b"not a directory");

    let result = prune_install_tree(temp.path(), OsFamily::Linux).unwrap();
    assert!(result.paths.is_empty());
    assert!(temp.path().join("include").is_file());
  }
}
