//! Tab markers.
//!
//! ```text
//! {-}
//! {--Kotlin--kotlin}
//! ...
//! {/--kotlin}
//! {/-}
//! ```
//!
//! The processor later turns the `<tabs>`/`<tab>` elements into a selector
//! and its panels.
use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

use crate::utils::compile;

static TAB_OPEN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{--(?<title>.+?)--(?<identifier>.+?)\}"));

static TAB_CLOSE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{/--(.*?)\}"));

/// Expand tab host and tab markers into `<tabs>` and `<tab>` elements.
#[must_use]
pub fn expand_tabs(markdown: &str) -> String {
  let markdown = markdown.replace("{-}", "<tabs>").replace("{/-}", "</tabs>");

  let markdown = TAB_OPEN_RE.replace_all(&markdown, |caps: &Captures| {
    format!(
      r#"<tab title="{}" identifier="{}">"#,
      attribute(&caps["title"]),
      attribute(&caps["identifier"]),
    )
  });

  TAB_CLOSE_RE.replace_all(&markdown, "</tab>").into_owned()
}

fn attribute(value: &str) -> Cow<'_, str> {
  html_escape::encode_double_quoted_attribute(value)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expands_host_and_tabs() {
    let input = "{-}\n{--Kotlin--kotlin}\nval x = 1\n{/--kotlin}\n\
                 {--Java--java}\nint x = 1;\n{/--java}\n{/-}";
    assert_eq!(
      expand_tabs(input),
      "<tabs>\n<tab title=\"Kotlin\" identifier=\"kotlin\">\nval x = 1\n</tab>\n\
       <tab title=\"Java\" identifier=\"java\">\nint x = 1;\n</tab>\n</tabs>"
    );
  }

  #[test]
  fn closing_marker_without_identifier() {
    assert_eq!(expand_tabs("{/--}"), "</tab>");
  }

  #[test]
  fn escapes_attribute_values() {
    assert_eq!(
      expand_tabs(r#"{--"Gradle" (Kotlin)--gradle-kts}"#),
      r#"<tab title="&quot;Gradle&quot; (Kotlin)" identifier="gradle-kts">"#
    );
  }
}
