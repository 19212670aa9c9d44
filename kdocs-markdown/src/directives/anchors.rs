//! Anchor relocation.
//!
//! Upstream documents put original anchor ids on their own line right above
//! the heading they belong to:
//!
//! ```markdown
//! {#null-safety}
//! ## 널 안정성
//! ```
//!
//! Everything downstream expects the marker at the end of the heading line,
//! so it is moved there.
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile;

static STANDALONE_ANCHOR_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"^\s*\{#([^}\s]+)\}\s*$"));

static HEADING_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"^#{1,6}\s"));

/// Move every `{#anchor}` line that directly precedes a heading to the end
/// of that heading.
#[must_use]
pub fn relocate_anchors(markdown: &str) -> String {
  let lines = markdown.split('\n').collect::<Vec<_>>();
  let mut output = Vec::with_capacity(lines.len());
  let mut index = 0;

  while index < lines.len() {
    let line = lines[index];

    if let Some(caps) = STANDALONE_ANCHOR_RE.captures(line)
      && let Some(next) = lines.get(index + 1)
      && HEADING_LINE_RE.is_match(next)
    {
      output.push(format!("{} {{#{}}}", next.trim_end(), &caps[1]));
      index += 2;
      continue;
    }

    output.push(line.to_string());
    index += 1;
  }

  output.join("\n")
}
