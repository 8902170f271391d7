//! Source discovery and object path derivation.
//!
//! Pure path functions. Nothing here touches the filesystem; the builder
//! decides when to recurse and when to compile.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{OBJECT_EXTENSION, SOURCE_EXTENSION};

/// Error deriving an object path from a source file name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourcePathError {
  /// The file name has no extension to strip.
  #[error("source name has no extension: {0}")]
  NoExtension(String),

  /// The path has no final file-name component.
  #[error("not a file path: {0}")]
  NoFileName(String),
}

/// Split a file name at its final `.` into stem and extension.
///
/// A name with no `.`, or only a leading one (a dotfile), has no extension.
fn split_extension(name: &str) -> Option<(&str, &str)> {
  match name.rfind('.') {
    None | Some(0) => None,
    Some(idx) => Some((&name[..idx], &name[idx + 1..])),
  }
}

/// Returns true iff `name` carries the juli source extension.
///
/// Consulted for plain files found while walking a directory; files passed
/// to the builder directly skip this check. A name with no extension never
/// matches.
pub fn is_source_file(name: &str) -> bool {
  split_extension(name).is_some_and(|(_, ext)| ext == SOURCE_EXTENSION)
}

/// Derive the object artifact path for `source`, staged under `build_dir`.
///
/// Strips exactly the final extension from the basename and appends the
/// object extension: `/src/foo.bar.jl` under `/build` becomes
/// `/build/foo.bar.o`. A basename with no extension is rejected so a wrong
/// path is never produced silently.
pub fn object_path(source: &Path, build_dir: &Path) -> Result<PathBuf, SourcePathError> {
  let name = source
    .file_name()
    .and_then(|n| n.to_str())
    .ok_or_else(|| SourcePathError::NoFileName(source.display().to_string()))?;

  let (stem, _) = split_extension(name).ok_or_else(|| SourcePathError::NoExtension(name.to_string()))?;

  Ok(build_dir.join(format!("{}.{}", stem, OBJECT_EXTENSION)))
}
