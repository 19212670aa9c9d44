//! Document pager.
//!
//! ```text
//! {~}
//! {<~basic-syntax.md}
//! {~>idioms.md}
//! {/~}
//! ```
//!
//! renders a previous/next box linking neighbouring documents by title.
use std::sync::LazyLock;

use regex::Regex;

use super::RewriteContext;
use crate::{
  error::DirectiveError,
  utils::{compile, try_replace_all},
};

static PAGER_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile(r"\{(?<direction><~|~>)(?<key>[^}]+)\}")
});

/// Expand the pager container and its previous/next links.
///
/// # Errors
///
/// Returns [`DirectiveError::UnknownPagerTarget`] when a link names a key
/// that is not a registered document.
pub fn expand_pager(
  markdown: &str,
  context: &RewriteContext<'_>,
) -> Result<String, DirectiveError> {
  let markdown = markdown
    .replace("{~}", "<div class=\"document-pager\">")
    .replace("{/~}", "</div>");

  try_replace_all(&PAGER_LINK_RE, &markdown, |caps| {
    let key = caps["key"].trim();
    let title = context.catalog.title_of(key).ok_or_else(|| {
      DirectiveError::UnknownPagerTarget {
        document: context.document_key.to_string(),
        key:      key.to_string(),
      }
    })?;

    let class = if &caps["direction"] == "<~" {
      "previous"
    } else {
      "next"
    };
    Ok(format!(
      "<a class=\"{class}\" href=\"{}\">{}</a>",
      html_escape::encode_double_quoted_attribute(&context.links.local_url(key)),
      html_escape::encode_text(title)
    ))
  })
}
