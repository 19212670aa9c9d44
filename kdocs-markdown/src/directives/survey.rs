//! Survey marker.
//!
//! `{&?url}` becomes a short note asking readers to rate the upstream page.
//! An empty `{&?}` points at the upstream page of the current document.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::LinkPolicy;
use crate::utils::compile;

static SURVEY_RE: LazyLock<Regex> =
  LazyLock::new(|| compile(r"\{&\?(?<url>[^}]*)\}"));

/// Replace every survey marker with the survey paragraph.
#[must_use]
pub fn expand_survey(
  markdown: &str,
  document: &str,
  links: &LinkPolicy,
) -> String {
  SURVEY_RE
    .replace_all(markdown, |caps: &Captures| {
      let url = caps["url"].trim();
      let url = if url.is_empty() {
        links.external_url(document)
      } else {
        url.to_string()
      };
      survey_paragraph(&url)
    })
    .into_owned()
}

fn survey_paragraph(url: &str) -> String {
  format!(
    "<p class=\"survey\">이 페이지가 도움이 되셨다면, <a href=\"{}\">원문 \
     페이지</a>에 방문해 엄지척을 해주세요!</p>",
    html_escape::encode_double_quoted_attribute(url)
  )
}
