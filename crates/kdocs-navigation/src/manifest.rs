//! Manifest records as they appear in `registry.json`.
use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

/// A record of the navigation manifest.
///
/// Exactly one of `href` and `children` is expected; the tree builder
/// rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
  /// Title shown in navigation.
  pub title: String,

  /// Longer title used for the page itself, if it differs.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub page_title: Option<String>,

  /// Document key, e.g. `basic-syntax.md`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub href: Option<String>,

  /// Nested records of a group.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub children: Option<Vec<Self>>,
}

impl RawDocument {
  /// A leaf record.
  #[must_use]
  pub fn leaf(title: &str, href: &str) -> Self {
    Self {
      title: title.to_string(),
      href: Some(href.to_string()),
      ..Self::default()
    }
  }

  /// A group record.
  #[must_use]
  pub fn group(title: &str, children: Vec<Self>) -> Self {
    Self {
      title: title.to_string(),
      children: Some(children),
      ..Self::default()
    }
  }

  /// Set the page title.
  #[must_use]
  pub fn with_page_title(mut self, page_title: &str) -> Self {
    self.page_title = Some(page_title.to_string());
    self
  }
}

/// Read a JSON array of [`RawDocument`]s.
///
/// # Errors
///
/// Returns [`NavigationError::Io`] if the file cannot be read and
/// [`NavigationError::Parse`] if it is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<Vec<RawDocument>, NavigationError> {
  let content =
    fs::read_to_string(path).map_err(|source| NavigationError::Io {
      path: path.to_path_buf(),
      source,
    })?;

  let records: Vec<RawDocument> =
    serde_json::from_str(&content).map_err(|source| {
      NavigationError::Parse {
        path: path.to_path_buf(),
        source,
      }
    })?;

  debug!(
    "Loaded {} top-level records from {}",
    records.len(),
    path.display()
  );
  Ok(records)
}
