use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading, validating or writing kdocs configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A value is out of range, a required input is missing, or an output
  /// would be overwritten without `--force`.
  #[error("Configuration error: {0}")]
  Invalid(String),

  #[error("Unknown configuration key: '{0}'")]
  UnknownKey(String),

  #[error("Unsupported config file format: {}", .0.display())]
  UnsupportedFormat(PathBuf),

  #[error("Failed to read config file {}: {source}", .path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse config file {}: {message}", .path.display())]
  Parse { path: PathBuf, message: String },

  #[error("Failed to write {}: {source}", .path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),
}
