//! Type definitions for the Markdown processor.
//!
//! # Examples
//!
//! ```
//! use kdocs_markdown::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   toc_depth: 2,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! assert_eq!(processor.options().toc_depth, 2);
//! ```

/// Default API documentation host; links to it are styled as API references.
pub const DEFAULT_API_DOC_PREFIX: &str = "https://kotlinlang.org/";

/// Deepest heading level listed in the table of contents by default.
pub const DEFAULT_TOC_DEPTH: u8 = 3;

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Deepest heading level (1-6) that appears in the table of contents.
  pub toc_depth: u8,

  /// Links starting with this prefix get the `api-doc` class instead of
  /// `external-link`.
  pub api_doc_prefix: String,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:            cfg!(feature = "gfm"),
      toc_depth:      DEFAULT_TOC_DEPTH,
      api_doc_prefix: DEFAULT_API_DOC_PREFIX.to_string(),
    }
  }
}

/// Main Markdown processor.
///
/// Holds no per-document state, so a single instance can be shared across
/// threads for the whole build.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}
