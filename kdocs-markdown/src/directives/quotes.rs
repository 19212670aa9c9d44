//! Quote variant markers.
//!
//! A `{>variant}` line styles the block quote right after it. The marker
//! becomes an empty `<div class="quote-{variant}">` which the processor
//! reads back when it decorates the following `<blockquote>`.
use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  error::DirectiveError,
  utils::{compile, try_replace_all},
};

static QUOTE_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{>(?<variant>[A-Za-z-]+)\}"));

/// Visual style of a block quote.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QuoteVariant {
  #[default]
  Information,
  Tip,
  Author,
  Caution,
}

impl QuoteVariant {
  pub const ALL: [Self; 4] =
    [Self::Information, Self::Tip, Self::Author, Self::Caution];

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Information => "information",
      Self::Tip => "tip",
      Self::Author => "author",
      Self::Caution => "caution",
    }
  }

  /// Class of the marker element, e.g. `quote-tip`.
  #[must_use]
  pub fn marker_class(self) -> String {
    format!("quote-{}", self.as_str())
  }
}

impl fmt::Display for QuoteVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for QuoteVariant {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|variant| variant.as_str() == s)
      .ok_or(())
  }
}

/// Replace every `{>variant}` marker with its marker element.
///
/// # Errors
///
/// Returns [`DirectiveError::UnknownQuoteVariant`] for a variant outside
/// [`QuoteVariant::ALL`].
pub fn expand_quote_variants(
  markdown: &str,
  document: &str,
) -> Result<String, DirectiveError> {
  try_replace_all(&QUOTE_MARKER_RE, markdown, |caps| {
    let name = &caps["variant"];
    let variant = name.parse::<QuoteVariant>().map_err(|()| {
      DirectiveError::UnknownQuoteVariant {
        document: document.to_string(),
        variant:  name.to_string(),
        position: caps.get(0).map_or(0, |m| m.start()),
      }
    })?;
    Ok(format!("<div class=\"{}\"></div>\n", variant.marker_class()))
  })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn expands_every_variant() {
    for variant in QuoteVariant::ALL {
      let output =
        expand_quote_variants(&format!("{{>{variant}}}\n> text"), "a.md")
          .unwrap();
      assert_eq!(
        output,
        format!("<div class=\"quote-{variant}\"></div>\n\n> text")
      );
    }
  }

  #[test]
  fn rejects_unknown_variant() {
    let err = expand_quote_variants("ok\n{>warning}", "a.md").unwrap_err();
    assert_eq!(
      err,
      DirectiveError::UnknownQuoteVariant {
        document: "a.md".to_string(),
        variant:  "warning".to_string(),
        position: 3,
      }
    );
  }

  #[test]
  fn default_variant_is_information() {
    assert_eq!(QuoteVariant::default(), QuoteVariant::Information);
    assert_eq!("caution".parse(), Ok(QuoteVariant::Caution));
    assert!("Tip".parse::<QuoteVariant>().is_err());
  }

  #[test]
  fn markdown_quotes_are_untouched() {
    let input = "> plain quote\n";
    assert_eq!(expand_quote_variants(input, "a.md").unwrap(), input);
  }
}
