//! Navigation tree construction and lookup.
use log::debug;

use crate::{error::NavigationError, manifest::RawDocument, node::NavigationNode};

/// Title of the synthetic group every tree is rooted at.
pub const ROOT_TITLE: &str = "_root_";

/// The immutable navigation tree of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTree {
  root: NavigationNode,
}

/// A located document and the chain of nodes leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location<'a> {
  chain: Vec<&'a NavigationNode>,
}

impl<'a> Location<'a> {
  /// The matched node.
  #[must_use]
  pub fn node(&self) -> &'a NavigationNode {
    self.chain[self.chain.len() - 1]
  }

  /// Synthetic root, every traversed group, then the matched node.
  #[must_use]
  pub fn chain(&self) -> &[&'a NavigationNode] {
    &self.chain
  }

  /// The chain without the synthetic root.
  #[must_use]
  pub fn breadcrumbs(&self) -> &[&'a NavigationNode] {
    &self.chain[1..]
  }
}

impl NavigationTree {
  /// Build the tree from manifest records.
  ///
  /// A leaf is enabled when `exists` returns true for its key; `home_key` is
  /// always enabled since the home page has no content file.
  ///
  /// # Errors
  ///
  /// Returns [`NavigationError::MalformedRecord`] for a record that has both
  /// or neither of `href` and `children`.
  pub fn build(
    raw: &[RawDocument],
    exists: impl Fn(&str) -> bool,
    home_key: &str,
  ) -> Result<Self, NavigationError> {
    let mut path = Vec::new();
    let children = build_nodes(raw, &exists, home_key, &mut path)?;
    let tree = Self {
      root: NavigationNode::Group {
        title: ROOT_TITLE.to_string(),
        page_title: None,
        children,
      },
    };

    debug!("Built navigation tree with {} documents", tree.flatten().len());
    Ok(tree)
  }

  /// Top-level nodes, without the synthetic root.
  #[must_use]
  pub fn nodes(&self) -> &[NavigationNode] {
    self.root.children()
  }

  /// Find the first leaf whose key equals `key`, depth-first in manifest
  /// order.
  #[must_use]
  pub fn locate(&self, key: &str) -> Option<Location<'_>> {
    let mut chain = vec![&self.root];
    find(&self.root, key, &mut chain).then_some(Location { chain })
  }

  /// Every leaf in manifest order.
  #[must_use]
  pub fn flatten(&self) -> Vec<&NavigationNode> {
    let mut leaves = Vec::new();
    collect_leaves(self.nodes(), &mut leaves);
    leaves
  }
}

/// Look a key up among documents kept outside the navigation tree.
///
/// These are always enabled; their breadcrumbs consist of the document
/// alone.
#[must_use]
pub fn locate_exceptional(
  exceptions: &[RawDocument],
  key: &str,
) -> Option<NavigationNode> {
  exceptions
    .iter()
    .find(|record| record.href.as_deref() == Some(key))
    .map(|record| {
      NavigationNode::Leaf {
        title:      record.title.clone(),
        page_title: record.page_title.clone(),
        href:       key.to_string(),
        enabled:    true,
      }
    })
}

fn build_nodes(
  raw: &[RawDocument],
  exists: &impl Fn(&str) -> bool,
  home_key: &str,
  path: &mut Vec<String>,
) -> Result<Vec<NavigationNode>, NavigationError> {
  raw
    .iter()
    .map(|record| build_node(record, exists, home_key, path))
    .collect()
}

fn build_node(
  record: &RawDocument,
  exists: &impl Fn(&str) -> bool,
  home_key: &str,
  path: &mut Vec<String>,
) -> Result<NavigationNode, NavigationError> {
  match (&record.href, &record.children) {
    (Some(href), None) => {
      Ok(NavigationNode::Leaf {
        title:      record.title.clone(),
        page_title: record.page_title.clone(),
        href:       href.clone(),
        enabled:    href == home_key || exists(href),
      })
    },
    (None, Some(children)) => {
      path.push(record.title.clone());
      let children = build_nodes(children, exists, home_key, path);
      path.pop();

      Ok(NavigationNode::Group {
        title:      record.title.clone(),
        page_title: record.page_title.clone(),
        children:   children?,
      })
    },
    _ => {
      Err(NavigationError::MalformedRecord {
        title: record.title.clone(),
        path:  path.clone(),
      })
    },
  }
}

fn find<'a>(
  node: &'a NavigationNode,
  key: &str,
  chain: &mut Vec<&'a NavigationNode>,
) -> bool {
  for child in node.children() {
    chain.push(child);
    if child.href() == Some(key) || find(child, key, chain) {
      return true;
    }
    chain.pop();
  }
  false
}

fn collect_leaves<'a>(
  nodes: &'a [NavigationNode],
  leaves: &mut Vec<&'a NavigationNode>,
) {
  for node in nodes {
    match node {
      NavigationNode::Group { children, .. } => collect_leaves(children, leaves),
      NavigationNode::Leaf { .. } => leaves.push(node),
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::panic, reason = "Fine in tests")]

  use super::*;

  fn manifest() -> Vec<RawDocument> {
    vec![
      RawDocument::leaf("홈", "home"),
      RawDocument::group("개념", vec![
        RawDocument::leaf("기본 문법", "basic-syntax.md"),
        RawDocument::group("타입", vec![RawDocument::leaf("숫자", "numbers.md")]),
      ]),
      RawDocument::leaf("관용구", "idioms.md"),
    ]
  }

  fn tree() -> NavigationTree {
    NavigationTree::build(&manifest(), |key| key != "idioms.md", "home").unwrap()
  }

  #[test]
  fn leaves_follow_file_existence() {
    let tree = NavigationTree::build(&[RawDocument::leaf("A", "a.md")], |_| false, "home")
      .unwrap();
    assert_eq!(tree.nodes(), &[NavigationNode::Leaf {
      title:      "A".to_string(),
      page_title: None,
      href:       "a.md".to_string(),
      enabled:    false,
    }]);
  }

  #[test]
  fn home_is_always_enabled() {
    let tree = NavigationTree::build(&manifest(), |_| false, "home").unwrap();
    assert!(tree.locate("home").unwrap().node().is_enabled());
    assert!(!tree.locate("numbers.md").unwrap().node().is_enabled());
  }

  #[test]
  fn locate_returns_chain_from_root() {
    let tree = tree();
    let location = tree.locate("numbers.md").unwrap();

    let titles = location
      .chain()
      .iter()
      .map(|node| node.title())
      .collect::<Vec<_>>();
    assert_eq!(titles, vec![ROOT_TITLE, "개념", "타입", "숫자"]);

    let breadcrumbs = location
      .breadcrumbs()
      .iter()
      .map(|node| node.title())
      .collect::<Vec<_>>();
    assert_eq!(breadcrumbs, vec!["개념", "타입", "숫자"]);
    assert_eq!(location.node().href(), Some("numbers.md"));
  }

  #[test]
  fn locate_misses_unknown_keys_and_groups() {
    let tree = tree();
    assert!(tree.locate("missing.md").is_none());
    assert!(tree.locate("개념").is_none());
  }

  #[test]
  fn locate_returns_first_match() {
    let raw = vec![
      RawDocument::group("first", vec![RawDocument::leaf("one", "dup.md")]),
      RawDocument::leaf("two", "dup.md"),
    ];
    let tree = NavigationTree::build(&raw, |_| true, "home").unwrap();
    assert_eq!(tree.locate("dup.md").unwrap().node().title(), "one");
  }

  #[test]
  fn flatten_lists_leaves_in_order() {
    let tree = tree();
    let keys = tree
      .flatten()
      .into_iter()
      .filter_map(NavigationNode::href)
      .collect::<Vec<_>>();
    assert_eq!(keys, vec![
      "home",
      "basic-syntax.md",
      "numbers.md",
      "idioms.md"
    ]);
  }

  #[test]
  fn malformed_records_fail_with_path() {
    let raw = vec![RawDocument::group("개념", vec![RawDocument {
      title: "빈 항목".to_string(),
      ..RawDocument::default()
    }])];

    let err = NavigationTree::build(&raw, |_| true, "home").unwrap_err();
    match &err {
      NavigationError::MalformedRecord { title, path } => {
        assert_eq!(title, "빈 항목");
        assert_eq!(path, &vec!["개념".to_string()]);
      },
      other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("개념"));
  }

  #[test]
  fn record_with_both_href_and_children_is_malformed() {
    let raw = vec![RawDocument {
      title:    "둘 다".to_string(),
      href:     Some("both.md".to_string()),
      children: Some(vec![]),
      ..RawDocument::default()
    }];
    assert!(matches!(
      NavigationTree::build(&raw, |_| true, "home"),
      Err(NavigationError::MalformedRecord { .. })
    ));
  }

  #[test]
  fn exceptional_documents_are_enabled() {
    let exceptions = vec![RawDocument::leaf("FAQ", "faq.md")];
    let node = locate_exceptional(&exceptions, "faq.md").unwrap();
    assert!(node.is_enabled());
    assert_eq!(node.display_title(), "FAQ");
    assert!(locate_exceptional(&exceptions, "home").is_none());
  }
}
