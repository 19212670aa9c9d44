//! Footnote markers.
//!
//! `{^[N]}` marks a reference and `{&[N]}` the matching footnote text. Both
//! are scoped to the closest `#` or `##` heading above them so that numbers
//! can restart per section without producing duplicate ids.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
  error::{DirectiveError, FootnoteKind},
  utils::compile,
};

static REFERENCE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{\^\[(?<number>[0-9]+)\]\}"));

static CONTENT_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{&\[(?<number>[0-9]+)\]\}"));

static ANCHOR_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\s*\{#[^}]*\}\s*$"));

/// Scope used for footnotes that appear before any heading.
pub const ROOT_SCOPE: &str = "root";

/// Replace every footnote marker with its HTML element.
///
/// # Errors
///
/// Returns [`DirectiveError::MalformedFootnote`] when a marker's number does
/// not fit into a footnote index.
pub fn resolve_footnotes(
  markdown: &str,
  document: &str,
) -> Result<String, DirectiveError> {
  let markdown =
    replace_markers(markdown, document, &REFERENCE_RE, FootnoteKind::Reference)?;
  replace_markers(&markdown, document, &CONTENT_RE, FootnoteKind::Content)
}

fn replace_markers(
  markdown: &str,
  document: &str,
  regex: &Regex,
  kind: FootnoteKind,
) -> Result<String, DirectiveError> {
  let mut output = String::with_capacity(markdown.len());
  let mut last = 0;

  for caps in regex.captures_iter(markdown) {
    let Some(whole) = caps.get(0) else {
      continue;
    };
    output.push_str(&markdown[last..whole.start()]);

    let malformed = || {
      DirectiveError::MalformedFootnote {
        document: document.to_string(),
        kind,
        position: whole.start(),
      }
    };
    let number = caps
      .name("number")
      .and_then(|m| m.as_str().parse::<u32>().ok())
      .ok_or_else(malformed)?;

    let scope = html_escape::encode_double_quoted_attribute(&scope_of(&output))
      .into_owned();
    let element = match kind {
      FootnoteKind::Reference => {
        format!(r#"<sup id="{scope}-ref-{number}" class="footnote-ref">{number}</sup>"#)
      },
      FootnoteKind::Content => {
        format!(
          r#"<span id="{scope}-content-{number}" class="footnote-content">[{number}]&nbsp;</span>"#
        )
      },
    };
    output.push_str(&element);
    last = whole.end();
  }

  output.push_str(&markdown[last..]);
  Ok(output)
}

/// Scope id derived from the closest `#`/`##` heading in `preceding`.
fn scope_of(preceding: &str) -> String {
  preceding
    .rsplit('\n')
    .find_map(|line| {
      line
        .strip_prefix("# ")
        .or_else(|| line.strip_prefix("## "))
    })
    .map_or_else(
      || ROOT_SCOPE.to_string(),
      |heading| {
        ANCHOR_MARKER_RE
          .replace(heading, "")
          .trim()
          .replace(' ', "-")
      },
    )
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn scopes_to_closest_heading() {
    let output =
      resolve_footnotes("# Intro\nSee {^[1]} and {&[1]} more.\n## Details\n", "a.md")
        .unwrap();
    assert_eq!(
      output,
      "# Intro\nSee <sup id=\"Intro-ref-1\" class=\"footnote-ref\">1</sup> and \
       <span id=\"Intro-content-1\" class=\"footnote-content\">[1]&nbsp;</span> \
       more.\n## Details\n"
    );
  }

  #[test]
  fn uses_root_scope_before_first_heading() {
    let output = resolve_footnotes("Lead {^[2]}\n# Later\n", "a.md").unwrap();
    assert!(output.contains(r#"<sup id="root-ref-2" class="footnote-ref">2</sup>"#));
  }

  #[test]
  fn deeper_headings_do_not_open_a_scope() {
    let output =
      resolve_footnotes("## Getting started\n### Step\nx {^[1]}", "a.md").unwrap();
    assert!(output.contains(r#"id="Getting-started-ref-1""#));
  }

  #[test]
  fn numbers_restart_per_section() {
    let output =
      resolve_footnotes("# A\n{^[1]}\n# B\n{^[1]}\n", "a.md").unwrap();
    assert!(output.contains(r#"id="A-ref-1""#));
    assert!(output.contains(r#"id="B-ref-1""#));
  }

  #[test]
  fn anchor_marker_is_not_part_of_scope() {
    let output =
      resolve_footnotes("## 기본 문법 {#basic-syntax}\n{&[3]}", "a.md").unwrap();
    assert!(output.contains(r#"id="기본-문법-content-3""#));
  }

  #[test]
  fn scope_is_attribute_escaped() {
    let output = resolve_footnotes("# a\"b\n{^[1]}", "a.md").unwrap();
    assert!(output.contains(r#"id="a&quot;b-ref-1""#));
  }

  #[test]
  fn oversized_number_is_malformed() {
    let err =
      resolve_footnotes("x {^[99999999999999999999]}", "big.md").unwrap_err();
    assert_eq!(
      err,
      DirectiveError::MalformedFootnote {
        document: "big.md".to_string(),
        kind:     FootnoteKind::Reference,
        position: 2,
      }
    );
  }

  #[test]
  fn leaves_text_without_markers_untouched() {
    let input = "# Title\n[^1] is not ours\n";
    assert_eq!(resolve_footnotes(input, "a.md").unwrap(), input);
  }
}
