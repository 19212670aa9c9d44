use serde::Serialize;

use crate::error::NavigationError;

/// A node of the navigation tree.
///
/// Groups only organize other nodes and are always enabled. Leaves point at
/// a document and are enabled when its content file exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationNode {
  Group {
    title:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_title: Option<String>,
    children:   Vec<NavigationNode>,
  },
  Leaf {
    title:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_title: Option<String>,
    href:       String,
    enabled:    bool,
  },
}

impl NavigationNode {
  #[must_use]
  pub fn title(&self) -> &str {
    match self {
      Self::Group { title, .. } | Self::Leaf { title, .. } => title,
    }
  }

  /// Title used for the page itself: `page_title` when set, `title`
  /// otherwise.
  #[must_use]
  pub fn display_title(&self) -> &str {
    match self {
      Self::Group {
        title, page_title, ..
      }
      | Self::Leaf {
        title, page_title, ..
      } => page_title.as_deref().unwrap_or(title),
    }
  }

  /// Document key of a leaf, `None` for groups.
  #[must_use]
  pub fn href(&self) -> Option<&str> {
    match self {
      Self::Group { .. } => None,
      Self::Leaf { href, .. } => Some(href),
    }
  }

  /// Document key of a leaf.
  ///
  /// # Errors
  ///
  /// Returns [`NavigationError::NotALeaf`] for groups, which have no key.
  pub fn key(&self) -> Result<&str, NavigationError> {
    self
      .href()
      .ok_or_else(|| NavigationError::NotALeaf(self.title().to_string()))
  }

  #[must_use]
  pub const fn is_enabled(&self) -> bool {
    match self {
      Self::Group { .. } => true,
      Self::Leaf { enabled, .. } => *enabled,
    }
  }

  #[must_use]
  pub const fn is_leaf(&self) -> bool {
    matches!(self, Self::Leaf { .. })
  }

  /// Children of a group; empty for leaves.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    match self {
      Self::Group { children, .. } => children,
      Self::Leaf { .. } => &[],
    }
  }
}
