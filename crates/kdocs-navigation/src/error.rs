use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for kdocs-navigation operations
#[derive(Debug, Error)]
pub enum NavigationError {
  #[error(
    "Malformed navigation record '{title}' (under {}): exactly one of href \
     and children must be set",
    display_path(.path)
  )]
  MalformedRecord { title: String, path: Vec<String> },

  #[error("Cannot access the key of document group '{0}'")]
  NotALeaf(String),

  #[error("Failed to read manifest {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse manifest {}: {source}", .path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

fn display_path(path: &[String]) -> String {
  if path.is_empty() {
    "the top level".to_string()
  } else {
    path.join(" > ")
  }
}
