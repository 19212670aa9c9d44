//! Directive expansion passes.
//!
//! Every pass is a pure `&str -> String` function that consumes all
//! occurrences of its marker before the next one runs. [`rewrite`] applies
//! them in the only order that is valid:
//!
//! 1. [`anchors::relocate_anchors`]
//! 2. [`footnotes::resolve_footnotes`]
//! 3. [`tabs::expand_tabs`]
//! 4. [`quotes::expand_quote_variants`]
//! 5. [`spacing::expand_list_spacing`]
//! 6. [`links::rewrite_dead_links`]
//! 7. [`survey::expand_survey`]
//! 8. [`pager::expand_pager`]
//! 9. [`links::expand_default_link_text`]
//!
//! Anchor relocation has to precede anything that reads heading lines, and
//! dead links are rewritten before the pager and default link passes emit
//! their own local links.
pub mod anchors;
pub mod footnotes;
pub mod links;
pub mod pager;
pub mod quotes;
pub mod spacing;
pub mod survey;
pub mod tabs;

use log::debug;

use crate::error::DirectiveError;

/// Read-only view over the documents of the site.
///
/// Implemented by the navigation layer; the rewriter never touches the file
/// system itself.
pub trait DocumentCatalog {
  /// Display title of the registered document with this key.
  fn title_of(&self, key: &str) -> Option<&str>;

  /// Whether a content file exists for this key.
  fn exists(&self, key: &str) -> bool;
}

/// How local document links map onto URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPolicy {
  /// Path prefix of local documentation links, e.g. `/docs/`.
  pub local_prefix: String,

  /// Base URL of the upstream documentation that untranslated documents
  /// fall back to, e.g. `https://kotlinlang.org/docs`.
  pub fallback_base_url: String,
}

impl Default for LinkPolicy {
  fn default() -> Self {
    Self {
      local_prefix:      "/docs/".to_string(),
      fallback_base_url: "https://kotlinlang.org/docs".to_string(),
    }
  }
}

impl LinkPolicy {
  /// Document key of a local link target, ignoring any `#fragment`.
  ///
  /// Returns `None` for targets outside the local prefix.
  #[must_use]
  pub fn key_of<'t>(&self, target: &'t str) -> Option<&'t str> {
    let (path, _) = split_fragment(target);
    path.strip_prefix(self.local_prefix.as_str())
  }

  /// Local URL of a document key.
  #[must_use]
  pub fn local_url(&self, key: &str) -> String {
    format!("{}{key}", self.local_prefix)
  }

  /// Upstream URL of a document key: `.md` is dropped and `.html` appended.
  #[must_use]
  pub fn external_url(&self, key: &str) -> String {
    let stem = key.strip_suffix(".md").unwrap_or(key);
    format!("{}/{stem}.html", self.fallback_base_url.trim_end_matches('/'))
  }
}

/// Split `path#fragment` into the path and the fragment including its `#`.
#[must_use]
pub fn split_fragment(target: &str) -> (&str, &str) {
  target
    .find('#')
    .map_or((target, ""), |index| target.split_at(index))
}

/// Everything the passes need to know about the document being rewritten.
#[derive(Clone, Copy)]
pub struct RewriteContext<'a> {
  /// Key of the document being rewritten, used in error messages and for
  /// the default survey link.
  pub document_key: &'a str,

  /// Titles and existence of other documents.
  pub catalog: &'a dyn DocumentCatalog,

  /// Link mapping rules.
  pub links: &'a LinkPolicy,
}

impl<'a> RewriteContext<'a> {
  #[must_use]
  pub const fn new(
    document_key: &'a str,
    catalog: &'a dyn DocumentCatalog,
    links: &'a LinkPolicy,
  ) -> Self {
    Self {
      document_key,
      catalog,
      links,
    }
  }
}

/// Run every directive pass over `markdown` in order.
///
/// # Errors
///
/// Returns the first [`DirectiveError`] raised by a pass. Errors always point
/// at malformed source; nothing here depends on runtime state.
pub fn rewrite(
  markdown: &str,
  context: &RewriteContext<'_>,
) -> Result<String, DirectiveError> {
  let key = context.document_key;

  let markdown = anchors::relocate_anchors(markdown);
  let markdown = footnotes::resolve_footnotes(&markdown, key)?;
  let markdown = tabs::expand_tabs(&markdown);
  let markdown = quotes::expand_quote_variants(&markdown, key)?;
  let markdown = spacing::expand_list_spacing(&markdown);
  let markdown =
    links::rewrite_dead_links(&markdown, context.catalog, context.links);
  let markdown = survey::expand_survey(&markdown, key, context.links);
  let markdown = pager::expand_pager(&markdown, context)?;
  let markdown = links::expand_default_link_text(&markdown, context)?;

  debug!("Expanded directives for {key}");
  Ok(markdown)
}

#[cfg(test)]
pub(crate) mod testing {
  use std::collections::{HashMap, HashSet};

  use super::DocumentCatalog;

  /// In-memory catalog for pass tests.
  #[derive(Default)]
  pub struct StaticCatalog {
    pub titles:   HashMap<String, String>,
    pub existing: HashSet<String>,
  }

  impl StaticCatalog {
    pub fn with_document(mut self, key: &str, title: &str) -> Self {
      self.titles.insert(key.to_string(), title.to_string());
      self.existing.insert(key.to_string());
      self
    }

    pub fn with_registered(mut self, key: &str, title: &str) -> Self {
      self.titles.insert(key.to_string(), title.to_string());
      self
    }
  }

  impl DocumentCatalog for StaticCatalog {
    fn title_of(&self, key: &str) -> Option<&str> {
      self.titles.get(key).map(String::as_str)
    }

    fn exists(&self, key: &str) -> bool {
      self.existing.contains(key)
    }
  }
}
