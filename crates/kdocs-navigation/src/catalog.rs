//! The catalog the directive rewriter resolves titles and existence through.
use std::collections::HashMap;

use kdocs_markdown::DocumentCatalog;

use crate::{store::DocumentStore, tree::NavigationTree};

/// Document titles from the flattened navigation tree, plus existence from a
/// [`DocumentStore`].
pub struct Catalog<'a, S: DocumentStore + ?Sized> {
  titles: HashMap<&'a str, &'a str>,
  store:  &'a S,
}

impl<'a, S: DocumentStore + ?Sized> Catalog<'a, S> {
  /// Index the leaves of `tree`. With duplicate keys the first leaf wins,
  /// matching [`NavigationTree::locate`].
  #[must_use]
  pub fn new(tree: &'a NavigationTree, store: &'a S) -> Self {
    let mut titles = HashMap::new();
    for leaf in tree.flatten() {
      if let Some(href) = leaf.href() {
        titles.entry(href).or_insert_with(|| leaf.display_title());
      }
    }
    Self { titles, store }
  }

  #[must_use]
  pub const fn store(&self) -> &'a S {
    self.store
  }
}

impl<S: DocumentStore + ?Sized> DocumentCatalog for Catalog<'_, S> {
  fn title_of(&self, key: &str) -> Option<&str> {
    self.titles.get(key).copied()
  }

  fn exists(&self, key: &str) -> bool {
    self.store.exists(key)
  }
}
