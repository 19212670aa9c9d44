use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Compile a pattern that is known to be valid, falling back to a regex that
/// never matches if it somehow is not.
#[must_use]
pub fn compile(pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    log::error!("Failed to compile regex {pattern:?}: {e}");
    never_matching_regex()
  })
}

/// Create a regex that never matches anything.
///
/// # Panics
///
/// Panics if the fallback pattern fails to compile, which cannot happen for a
/// fixed valid pattern.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(clippy::unwrap_used, reason = "Pattern is a constant")]
  Regex::new(r"[^\s\S]").unwrap()
}

/// Replace every match of `regex` with the result of `replacer`, stopping at
/// the first error.
///
/// # Errors
///
/// Returns the first error produced by `replacer`.
pub fn try_replace_all<E, F>(
  regex: &Regex,
  haystack: &str,
  mut replacer: F,
) -> Result<String, E>
where
  F: FnMut(&Captures) -> Result<String, E>,
{
  let mut output = String::with_capacity(haystack.len());
  let mut last = 0;

  for caps in regex.captures_iter(haystack) {
    let Some(whole) = caps.get(0) else {
      continue;
    };
    output.push_str(&haystack[last..whole.start()]);
    output.push_str(&replacer(&caps)?);
    last = whole.end();
  }

  output.push_str(&haystack[last..]);
  Ok(output)
}

/// Remove every HTML tag, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^>]*)?/?>"));

  TAG_RE.replace_all(html, "").into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strip_tags_removes_attributes_and_nesting() {
    assert_eq!(
      strip_tags(r#"<code>val</code> and <a href="/x">link</a>"#),
      "val and link"
    );
    assert_eq!(strip_tags("no tags"), "no tags");
    assert_eq!(strip_tags("a < b"), "a < b");
  }

  #[test]
  fn try_replace_all_stops_on_error() {
    let re = compile(r"\d");
    let result: Result<String, String> = try_replace_all(&re, "a1b2", |caps| {
      if &caps[0] == "2" {
        Err("two".to_string())
      } else {
        Ok("x".to_string())
      }
    });
    assert_eq!(result, Err("two".to_string()));

    let ok: Result<String, ()> =
      try_replace_all(&re, "a1b2c", |_| Ok("#".to_string()));
    assert_eq!(ok, Ok("a#b#c".to_string()));
  }
}
