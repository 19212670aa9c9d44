use std::fmt;

use thiserror::Error;

/// Which of the two footnote markers a [`DirectiveError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootnoteKind {
  /// `{^[N]}`
  Reference,
  /// `{&[N]}`
  Content,
}

impl fmt::Display for FootnoteKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Reference => f.write_str("ref"),
      Self::Content => f.write_str("content"),
    }
  }
}

/// Authoring defects found while expanding directives.
///
/// These never depend on runtime state: the same source always fails the
/// same way, so they abort the render instead of being recovered from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
  #[error(
    "Cannot parse number for {document}'s footnote {kind} at position \
     {position}"
  )]
  MalformedFootnote {
    document: String,
    kind:     FootnoteKind,
    position: usize,
  },

  #[error("{document} references unknown pager target '{key}'")]
  UnknownPagerTarget { document: String, key: String },

  #[error("{document} links to unknown document '{key}' without link text")]
  UnknownLinkTarget { document: String, key: String },

  #[error(
    "{document} uses unknown quote variant '{variant}' at position {position}"
  )]
  UnknownQuoteVariant {
    document: String,
    variant:  String,
    position: usize,
  },
}
