use std::{io, path::PathBuf};

use kdocs_markdown::DirectiveError;
use thiserror::Error;

/// Error type for kdocs-html operations
#[derive(Debug, Error)]
pub enum PageError {
  /// The document source contains a malformed directive.
  #[error("Malformed source in {key}: {source}")]
  Directive {
    key:    String,
    #[source]
    source: DirectiveError,
  },

  #[error("Template error: {0}")]
  Template(#[from] tera::Error),

  #[error("Failed to read {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
}
