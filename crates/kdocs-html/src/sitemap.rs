//! `sitemap.xml` generation.
use std::{collections::HashSet, fmt::Write};

use html_escape::encode_text;
use jiff::Timestamp;
use kdocs_markdown::LinkPolicy;

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
  pub url:           String,
  pub last_modified: Option<Timestamp>,
}

/// Collect sitemap entries.
///
/// Every document in `keys` whose content file exists gets an entry dated
/// with its last commit. The site root and the documentation home come
/// first, both dated with the newest document date.
pub fn collect_entries<'k>(
  site_url: &str,
  home_key: &str,
  links: &LinkPolicy,
  keys: impl IntoIterator<Item = &'k str>,
  exists: impl Fn(&str) -> bool,
  last_modified: impl Fn(&str) -> Option<Timestamp>,
) -> Vec<SitemapEntry> {
  let base = site_url.trim_end_matches('/');
  let mut seen = HashSet::new();

  let documents = keys
    .into_iter()
    .filter(|key| seen.insert(*key) && exists(*key))
    .map(|key| {
      SitemapEntry {
        url:           format!("{base}{}", links.local_url(key)),
        last_modified: last_modified(key),
      }
    })
    .collect::<Vec<_>>();

  let newest = documents
    .iter()
    .filter_map(|entry| entry.last_modified)
    .max();

  let mut entries = vec![
    SitemapEntry {
      url:           format!("{base}/"),
      last_modified: newest,
    },
    SitemapEntry {
      url:           format!("{base}{}", links.local_url(home_key)),
      last_modified: newest,
    },
  ];
  entries.extend(documents);
  entries
}

/// Serialize entries in the sitemaps.org format.
#[must_use]
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
  let mut xml = String::from(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset \
     xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
  );
  for entry in entries {
    xml.push_str("  <url>\n");
    // Writing to String is infallible
    let _ = writeln!(xml, "    <loc>{}</loc>", encode_text(&entry.url));
    if let Some(timestamp) = entry.last_modified {
      let _ = writeln!(xml, "    <lastmod>{timestamp}</lastmod>");
    }
    xml.push_str("  </url>\n");
  }
  xml.push_str("</urlset>\n");
  xml
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  fn at(raw: &str) -> Timestamp {
    raw.parse().unwrap()
  }

  fn entries() -> Vec<SitemapEntry> {
    collect_entries(
      "https://kdocs.example/",
      "home",
      &LinkPolicy::default(),
      ["basic-syntax.md", "missing.md", "idioms.md", "basic-syntax.md"],
      |key| key != "missing.md",
      |key| {
        match key {
          "basic-syntax.md" => Some(at("2024-05-03T01:00:00Z")),
          "idioms.md" => Some(at("2024-06-10T12:30:00Z")),
          _ => None,
        }
      },
    )
  }

  #[test]
  fn root_entries_carry_newest_document_date() {
    let entries = entries();
    let urls = entries.iter().map(|e| e.url.as_str()).collect::<Vec<_>>();
    assert_eq!(urls, vec![
      "https://kdocs.example/",
      "https://kdocs.example/docs/home",
      "https://kdocs.example/docs/basic-syntax.md",
      "https://kdocs.example/docs/idioms.md",
    ]);
    assert_eq!(entries[0].last_modified, Some(at("2024-06-10T12:30:00Z")));
    assert_eq!(entries[1].last_modified, entries[0].last_modified);
  }

  #[test]
  fn untracked_documents_have_no_lastmod() {
    let entries = collect_entries(
      "https://kdocs.example",
      "home",
      &LinkPolicy::default(),
      ["a.md"],
      |_| true,
      |_| None,
    );
    let xml = render_sitemap(&entries);
    assert!(!xml.contains("<lastmod>"));
    assert!(xml.contains("<loc>https://kdocs.example/docs/a.md</loc>"));
  }

  #[test]
  fn renders_xml() {
    let xml = render_sitemap(&entries());
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains(
      "  <url>\n    <loc>https://kdocs.example/docs/idioms.md</loc>\n    \
       <lastmod>2024-06-10T12:30:00Z</lastmod>\n  </url>\n"
    ));
    assert!(xml.ends_with("</urlset>\n"));
  }
}
