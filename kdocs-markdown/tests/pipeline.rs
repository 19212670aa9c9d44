#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::collections::HashMap;

use kdocs_markdown::{
  DirectiveError,
  DocumentCatalog,
  LinkPolicy,
  MarkdownOptions,
  MarkdownProcessor,
  RewriteContext,
};

/// Catalog of `(key, title, exists)` triples.
struct Fixture(HashMap<&'static str, (&'static str, bool)>);

impl Fixture {
  fn new(entries: &[(&'static str, &'static str, bool)]) -> Self {
    Self(
      entries
        .iter()
        .map(|&(key, title, exists)| (key, (title, exists)))
        .collect(),
    )
  }
}

impl DocumentCatalog for Fixture {
  fn title_of(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(|(title, _)| *title)
  }

  fn exists(&self, key: &str) -> bool {
    self.0.get(key).is_some_and(|(_, exists)| *exists)
  }
}

const DOCUMENT: &str = "{#basic-syntax}
# 기본 문법

Kotlin{^[1]} 예제입니다.

{>tip}
> 팁입니다.

{-}

{--Kotlin--kotlin}

```kotlin
val x = 1
```

{/--kotlin}

{/-}

[코루틴](/docs/coroutines.md) 과 [](idioms.md)

{~}
{~>idioms.md}
{/~}

{&[1]} 각주 내용
";

fn fixture() -> Fixture {
  Fixture::new(&[
    ("basic-syntax.md", "기본 문법", true),
    ("idioms.md", "관용구", true),
    ("coroutines.md", "코루틴", false),
  ])
}

#[test]
fn full_document_pipeline() {
  let catalog = fixture();
  let links = LinkPolicy::default();
  let context = RewriteContext::new("basic-syntax.md", &catalog, &links);
  let processor = MarkdownProcessor::new(MarkdownOptions::default());

  let document = processor
    .render_document(DOCUMENT, &context, "기본 문법")
    .expect("document is well formed");
  let html = &document.html;

  assert_eq!(document.headings.len(), 2);
  assert_eq!(document.headings[0].text, "기본 문법");
  assert_eq!(document.headings[1].id, "기본-문법");

  assert!(html.contains("class=\"anchor-container\""));
  assert!(html.contains("id=\"basic-syntax\""));
  assert!(!html.contains("{#basic-syntax}"));

  assert!(html.contains("id=\"기본-문법-ref-1\""));
  assert!(html.contains("id=\"기본-문법-content-1\""));

  assert!(html.contains("<blockquote class=\"quote quote-tip\">"));

  assert!(html.contains("class=\"tab-host\""));
  assert!(html.contains("data-identifier=\"kotlin\""));
  assert!(html.contains("language-kotlin"));

  assert!(html.contains("https://kotlinlang.org/docs/coroutines.html"));
  assert!(html.contains(">관용구</a>"));
  assert!(html.contains("class=\"local-link next\""));
  assert!(html.contains("class=\"document-pager\""));
}

#[test]
fn rewrite_is_stable_on_its_own_output() {
  let catalog = fixture();
  let links = LinkPolicy::default();
  let context = RewriteContext::new("basic-syntax.md", &catalog, &links);

  let once = kdocs_markdown::rewrite(DOCUMENT, &context).expect("well formed");
  let twice = kdocs_markdown::rewrite(&once, &context).expect("well formed");
  assert_eq!(once, twice);
}

#[test]
fn malformed_sources_name_the_document() {
  let catalog = fixture();
  let links = LinkPolicy::default();
  let context = RewriteContext::new("broken.md", &catalog, &links);
  let processor = MarkdownProcessor::new(MarkdownOptions::default());

  let err = processor
    .render_document("[](nowhere.md)", &context, "Broken")
    .expect_err("unknown link target");
  assert_eq!(err, DirectiveError::UnknownLinkTarget {
    document: "broken.md".to_string(),
    key:      "nowhere.md".to_string(),
  });
  assert!(err.to_string().contains("broken.md"));
}

#[test]
fn toc_depth_limits_headings() {
  let catalog = fixture();
  let links = LinkPolicy::default();
  let context = RewriteContext::new("basic-syntax.md", &catalog, &links);
  let processor = MarkdownProcessor::new(MarkdownOptions {
    toc_depth: 2,
    ..Default::default()
  });

  let document = processor
    .render_document("## 둘\n\n### 셋\n", &context, "제목")
    .expect("well formed");
  let levels = document
    .headings
    .iter()
    .map(|heading| heading.level)
    .collect::<Vec<_>>();
  assert_eq!(levels, vec![1, 2]);
}
