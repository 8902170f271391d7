//! Compiler and linker command configuration.
//!
//! `julibuild.toml` is a flat table of command templates:
//!
//! ```toml
//! compiler = "juli-cc -c"
//! linker = "cc"
//! ```
//!
//! Loaded and validated once, before anything is spawned. A missing file,
//! a missing key, or an empty template is fatal at startup.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::runner::CommandLine;

/// Error loading the build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file does not exist or cannot be read.
  #[error("cannot read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: io::Error,
  },

  /// The file is not valid TOML or lacks a required key.
  #[error("invalid configuration in {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },

  /// A command template is empty.
  #[error("configuration key `{key}` is empty")]
  EmptyTemplate { key: &'static str },
}

#[derive(Debug, Deserialize)]
struct RawConfig {
  compiler: String,
  linker: String,
}

/// Resolved compiler and linker command templates.
///
/// Immutable once loaded; the builder only extends copies of these with
/// file paths per invocation.
#[derive(Debug, Clone)]
pub struct Config {
  pub compiler: CommandLine,
  pub linker: CommandLine,
}

impl Config {
  /// Load and validate the configuration file at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.display().to_string(),
      source: e,
    })?;

    let raw: RawConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse {
      path: path.display().to_string(),
      source: e,
    })?;

    let compiler = CommandLine::parse(&raw.compiler).ok_or(ConfigError::EmptyTemplate { key: "compiler" })?;
    let linker = CommandLine::parse(&raw.linker).ok_or(ConfigError::EmptyTemplate { key: "linker" })?;

    debug!(compiler = %compiler, linker = %linker, "configuration loaded");

    Ok(Config { compiler, linker })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("julibuild.toml");
    fs::write(&path, content).unwrap();
    (temp, path)
  }

  #[test]
  fn loads_both_templates() {
    let (_temp, path) = write_config("compiler = \"juli-cc -c\"\nlinker = \"cc\"\n");
    let config = Config::load(&path).unwrap();
    assert_eq!(config.compiler.program(), "juli-cc");
    assert_eq!(config.compiler.args(), ["-c"]);
    assert_eq!(config.linker.program(), "cc");
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(&temp.path().join("julibuild.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn missing_key_is_a_parse_error() {
    let (_temp, path) = write_config("compiler = \"juli-cc\"\n");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }

  #[test]
  fn invalid_toml_is_a_parse_error() {
    let (_temp, path) = write_config("compiler = [not toml");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }

  #[test]
  fn empty_template_is_rejected() {
    let (_temp, path) = write_config("compiler = \"  \"\nlinker = \"cc\"\n");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTemplate { key: "compiler" }));
  }
}
