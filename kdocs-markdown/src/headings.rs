//! Table of contents extraction and heading ids.
//!
//! Headings are read from comrak's HTML rather than the markdown source so
//! that raw HTML headings and inline markup are handled the same way the
//! browser will show them.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
  types::Heading,
  utils::{compile, strip_tags},
};

static HEADING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile(r"(?i)<(?<opening>h[1-6])>(?<text>.+?)</h[1-6]>")
});

static ORIGINAL_ANCHOR_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r" \{#(?<id>.+?)\}"));

/// Characters dropped from generated heading ids.
const ID_STRIPPED_CHARS: [char; 7] = ['(', ')', '[', ']', ':', '{', '}'];

/// Extract the table of contents from rendered HTML.
///
/// The document title always comes first as a level 1 entry, whether or not
/// the body repeats it. Headings deeper than `max_level` are skipped.
#[must_use]
pub fn extract_headings(html: &str, title: &str, max_level: u8) -> Vec<Heading> {
  let mut headings = vec![Heading {
    level: 1,
    text:  title.to_string(),
    id:    heading_id(title),
  }];

  for caps in HEADING_TAG_RE.captures_iter(html) {
    let Some(level) = caps["opening"]
      .get(1..)
      .and_then(|digit| digit.parse::<u8>().ok())
    else {
      continue;
    };
    if level > max_level {
      continue;
    }

    let text = strip_tags(&caps["text"]);
    let text =
      html_escape::decode_html_entities(&remove_original_anchor(&text))
        .trim()
        .to_string();
    let id = heading_id(&text);

    headings.push(Heading { level, text, id });
  }

  headings
}

/// Localized anchor id of a heading: the marker is dropped, spaces become
/// `-` and `()[]:{}` are removed.
#[must_use]
pub fn heading_id(text: &str) -> String {
  remove_original_anchor(text)
    .replace(' ', "-")
    .replace(ID_STRIPPED_CHARS, "")
}

/// The upstream anchor id carried by a ` {#id}` marker, if any.
#[must_use]
pub fn original_anchor(text: &str) -> Option<&str> {
  ORIGINAL_ANCHOR_RE
    .captures(text)
    .and_then(|caps| caps.name("id"))
    .map(|id| id.as_str())
}

/// Heading text without its ` {#id}` marker.
#[must_use]
pub fn remove_original_anchor(text: &str) -> String {
  ORIGINAL_ANCHOR_RE.replace(text, "").into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_always_comes_first() {
    let headings = extract_headings("<p>no headings</p>", "기본 문법", 3);
    assert_eq!(headings, vec![Heading {
      level: 1,
      text:  "기본 문법".to_string(),
      id:    "기본-문법".to_string(),
    }]);
  }

  #[test]
  fn extracts_in_document_order_up_to_max_level() {
    let html = "<h2>패키지 정의</h2>\n<p>x</p>\n<h4>deep</h4>\n<h3>프로그램 \
                <code>main</code> {#entry}</h3>";
    let headings = extract_headings(html, "Title", 3);

    let summary = headings
      .iter()
      .map(|h| (h.level, h.text.as_str(), h.id.as_str()))
      .collect::<Vec<_>>();
    assert_eq!(summary, vec![
      (1, "Title", "Title"),
      (2, "패키지 정의", "패키지-정의"),
      (3, "프로그램 main", "프로그램-main"),
    ]);
  }

  #[test]
  fn max_level_six_keeps_everything() {
    let html = "<h5>five</h5><h6>six</h6>";
    assert_eq!(extract_headings(html, "T", 6).len(), 3);
  }

  #[test]
  fn decodes_entities_once() {
    let headings = extract_headings("<h2>A &amp; B &lt;T&gt;</h2>", "T", 3);
    assert_eq!(headings[1].text, "A & B <T>");
  }

  #[test]
  fn ids_drop_signs() {
    assert_eq!(heading_id("함수 (functions): 기본 [1]"), "함수-functions-기본-1");
    assert_eq!(heading_id("널 안정성 {#null-safety}"), "널-안정성");
    assert_eq!(heading_id("map{k}"), "mapk");
  }

  #[test]
  fn original_anchor_is_read_from_marker() {
    assert_eq!(original_anchor("널 안정성 {#null-safety}"), Some("null-safety"));
    assert_eq!(original_anchor("plain"), None);
    assert_eq!(remove_original_anchor("a {#b}"), "a");
  }
}
