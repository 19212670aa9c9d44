//! Access to document content.
use std::{
  fs,
  io,
  path::{Component, Path, PathBuf},
};

/// Source of document content, keyed by document key.
///
/// A missing document is an expected state (it simply has not been
/// translated yet), so [`DocumentStore::exists`] is a plain bool.
pub trait DocumentStore: Send + Sync {
  /// Whether a content file exists for `key`.
  fn exists(&self, key: &str) -> bool;

  /// Read the content of `key`.
  ///
  /// # Errors
  ///
  /// Returns the underlying I/O error, `NotFound` for missing documents.
  fn read(&self, key: &str) -> io::Result<String>;

  /// File backing `key`, for stores that have one.
  fn source_path(&self, _key: &str) -> Option<PathBuf> {
    None
  }
}

/// Documents stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
  root: PathBuf,
}

impl FsDocumentStore {
  #[must_use]
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  #[must_use]
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of `key` below the root, or `None` for keys that would escape it.
  #[must_use]
  pub fn path_of(&self, key: &str) -> Option<PathBuf> {
    let relative = Path::new(key);
    let is_plain = !key.is_empty()
      && relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    is_plain.then(|| self.root.join(relative))
  }
}

impl DocumentStore for FsDocumentStore {
  fn exists(&self, key: &str) -> bool {
    self.path_of(key).is_some_and(|path| path.is_file())
  }

  fn read(&self, key: &str) -> io::Result<String> {
    let path = self.path_of(key).ok_or_else(|| {
      io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Invalid document key: {key}"),
      )
    })?;
    fs::read_to_string(path)
  }

  fn source_path(&self, key: &str) -> Option<PathBuf> {
    self.path_of(key).filter(|path| path.is_file())
  }
}
