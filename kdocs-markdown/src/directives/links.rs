//! Link rewriting.
//!
//! Two passes live here. [`rewrite_dead_links`] points links at untranslated
//! documents to the upstream page instead of a local 404, and
//! [`expand_default_link_text`] fills in `[](target)` links with the title
//! of the document they point to.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{DocumentCatalog, LinkPolicy, RewriteContext, split_fragment};
use crate::{
  error::DirectiveError,
  utils::{compile, try_replace_all},
};

static INLINE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile(
    r#"\[(?<text>(?:[^\[\]]|\[[^\]]*\])+)\]\((?<href>[^)\s]+)(?<title>\s+"[^"]*")?\)"#,
  )
});

static EMPTY_TEXT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile(r"(?<image>!)?\[\]\(\s*'?(?<target>[^)'\s]+)'?\s*\)")
});

/// Point local links whose document has no content file at the upstream
/// documentation.
///
/// Link text, optional title and `#fragment` are preserved. Links outside
/// the local prefix are left untouched.
#[must_use]
pub fn rewrite_dead_links(
  markdown: &str,
  catalog: &dyn DocumentCatalog,
  links: &LinkPolicy,
) -> String {
  INLINE_LINK_RE
    .replace_all(markdown, |caps: &Captures| {
      let href = &caps["href"];
      let Some(key) = links.key_of(href) else {
        return caps[0].to_string();
      };
      if catalog.exists(key) {
        return caps[0].to_string();
      }

      let (_, fragment) = split_fragment(href);
      let title = caps.name("title").map_or("", |m| m.as_str());
      format!(
        "[{}]({}{fragment}{title})",
        &caps["text"],
        links.external_url(key)
      )
    })
    .into_owned()
}

/// Fill in `[](target)` links with the target document's title.
///
/// Images with an empty alt text, fragment-only targets and absolute URLs
/// are left alone, since there is no document to take a title from.
///
/// # Errors
///
/// Returns [`DirectiveError::UnknownLinkTarget`] when the target is not a
/// registered document.
pub fn expand_default_link_text(
  markdown: &str,
  context: &RewriteContext<'_>,
) -> Result<String, DirectiveError> {
  try_replace_all(&EMPTY_TEXT_LINK_RE, markdown, |caps| {
    let target = &caps["target"];
    if caps.name("image").is_some()
      || target.starts_with('#')
      || target.contains("://")
    {
      return Ok(caps[0].to_string());
    }

    let (path, fragment) = split_fragment(target);
    let key = path
      .strip_prefix(context.links.local_prefix.as_str())
      .unwrap_or(path);

    let title = context.catalog.title_of(key).ok_or_else(|| {
      DirectiveError::UnknownLinkTarget {
        document: context.document_key.to_string(),
        key:      key.to_string(),
      }
    })?;

    Ok(format!(
      "[{}]({}{fragment})",
      escape_link_text(title),
      context.links.local_url(key)
    ))
  })
}

/// Backslash-escape characters that would end or restyle link text.
fn escape_link_text(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for ch in text.chars() {
    if matches!(ch, '\\' | '[' | ']' | '*' | '_' | '`' | '<') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}
