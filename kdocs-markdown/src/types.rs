//! Types for kdocs-markdown public API and internal use.
use serde::{Deserialize, Serialize};

/// A heading in a rendered document, used as a table of contents entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading level (1-6).
  pub level: u8,
  /// Plain heading text, without inner tags or anchor markers.
  pub text:  String,
  /// Anchor id the heading is reachable under.
  pub id:    String,
}

/// Result of running a document through the full pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedDocument {
  /// Markdown after every directive pass.
  pub markdown: String,

  /// Rendered and post-processed HTML.
  pub html: String,

  /// Table of contents, starting with the document title.
  pub headings: Vec<Heading>,
}
