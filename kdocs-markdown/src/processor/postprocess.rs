//! DOM transformations applied to comrak's HTML.
//!
//! The markup produced here is plain HTML with class hooks; styling and any
//! interactivity (tab switching, anchor scrolling) live in the page
//! templates.
use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use log::warn;
use markup5ever::{LocalName, QualName, ns};
use tendril::TendrilSink;

use super::types::MarkdownOptions;
use crate::{
  directives::quotes::QuoteVariant,
  headings::{heading_id, original_anchor, remove_original_anchor},
};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Parse `html` as a fragment, apply every transformation and serialize the
/// body back.
pub(crate) fn apply_dom_transformations(
  html: &str,
  options: &MarkdownOptions,
) -> String {
  let document = kuchikikiki::parse_html().one(html);

  decorate_headings(&document);
  decorate_blockquotes(&document);
  build_tab_hosts(&document);
  classify_links(&document, &options.api_doc_prefix);
  wrap_tables(&document);

  serialize_body(&document)
}

/// Wrap every heading in an anchor container with targets for its localized
/// id and, when present, its original `{#id}`.
fn decorate_headings(document: &NodeRef) {
  for heading in select_all(document, HEADING_SELECTOR) {
    let text = heading.text_contents();
    let localized = heading_id(text.trim());
    let original = original_anchor(&text).map(str::to_string);

    for node in heading.descendants() {
      if let Some(text) = node.as_text() {
        let cleaned = remove_original_anchor(&text.borrow());
        *text.borrow_mut() = cleaned;
      }
    }
    if let Some(last) = heading.last_child()
      && let Some(text) = last.as_text()
    {
      let trimmed = text.borrow().trim_end().to_string();
      *text.borrow_mut() = trimmed;
    }

    let container = element("div", vec![("class", "anchor-container".into())]);
    container.append(element("span", vec![
      ("class", "anchor".into()),
      ("id", localized.clone()),
    ]));
    if let Some(original) = original
      && original != localized
    {
      container.append(element("span", vec![
        ("class", "anchor".into()),
        ("id", original),
      ]));
    }

    heading.insert_before(container.clone());
    container.append(heading);
  }
}

/// Give each blockquote the variant named by the marker element right before
/// it.
fn decorate_blockquotes(document: &NodeRef) {
  for quote in select_all(document, "blockquote") {
    let variant = quote
      .preceding_siblings()
      .find(|sibling| sibling.as_element().is_some())
      .and_then(|sibling| marker_variant(&sibling))
      .unwrap_or_default();

    set_attribute(&quote, "class", format!("quote quote-{variant}"));
  }
}

fn marker_variant(node: &NodeRef) -> Option<QuoteVariant> {
  let class = attribute(node, "class")?;
  class
    .split_whitespace()
    .filter_map(|token| token.strip_prefix("quote-"))
    .find_map(|name| name.parse().ok())
}

/// Turn `<tabs>`/`<tab>` into a tab host with a selector list. The first tab
/// starts selected.
fn build_tab_hosts(document: &NodeRef) {
  for tabs in select_all(document, "tabs") {
    let items = tabs
      .children()
      .filter(|child| {
        child
          .as_element()
          .is_some_and(|e| e.name.local.as_ref() == "tab")
      })
      .collect::<Vec<_>>();

    let entries = items
      .iter()
      .map(|tab| {
        let identifier = attribute(tab, "identifier").unwrap_or_default();
        let title =
          attribute(tab, "title").unwrap_or_else(|| identifier.clone());
        (identifier, title)
      })
      .collect::<Vec<_>>();

    let selected = entries
      .first()
      .map(|(identifier, _)| identifier.clone())
      .unwrap_or_default();

    let host = element("div", vec![
      ("class", "tab-host".into()),
      ("data-selected", selected),
    ]);
    let selector = element("ul", vec![("class", "tab-selector".into())]);
    for (index, (identifier, title)) in entries.iter().enumerate() {
      let item = element("li", vec![
        ("class", selected_class("tab-selector-item", index)),
        ("data-identifier", identifier.clone()),
      ]);
      item.append(NodeRef::new_text(title.clone()));
      selector.append(item);
    }
    host.append(selector);

    for (index, (tab, (identifier, title))) in
      items.iter().zip(entries).enumerate()
    {
      let panel = element("div", vec![
        ("class", selected_class("tab-item", index)),
        ("data-identifier", identifier),
        ("data-title", title),
      ]);
      move_children(tab, &panel);
      tab.insert_before(panel);
      tab.detach();
    }

    move_children(&tabs, &host);
    tabs.insert_before(host);
    tabs.detach();
  }
}

fn selected_class(base: &str, index: usize) -> String {
  if index == 0 {
    format!("{base} selected")
  } else {
    base.to_string()
  }
}

/// Classify links as local, API reference or external.
fn classify_links(document: &NodeRef, api_doc_prefix: &str) {
  for link in select_all(document, "a[href]") {
    let Some(href) = attribute(&link, "href") else {
      continue;
    };

    let class = if href.starts_with('/') || href.starts_with('#') {
      match attribute(&link, "class") {
        Some(existing) if !existing.trim().is_empty() => {
          format!("local-link {}", existing.trim())
        },
        _ => "local-link".to_string(),
      }
    } else if href.starts_with(api_doc_prefix) {
      "api-doc".to_string()
    } else {
      "external-link".to_string()
    };

    set_attribute(&link, "class", class);
  }
}

fn wrap_tables(document: &NodeRef) {
  for table in select_all(document, "table") {
    let wrapper = element("div", vec![("class", "table-wrapper".into())]);
    table.insert_before(wrapper.clone());
    wrapper.append(table);
  }
}

fn select_all(document: &NodeRef, selector: &str) -> Vec<NodeRef> {
  document
    .select(selector)
    .map(|nodes| nodes.map(|node| node.as_node().clone()).collect())
    .unwrap_or_default()
}

fn element(tag: &str, attributes: Vec<(&str, String)>) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), LocalName::from(tag)),
    attributes.into_iter().map(|(name, value)| {
      (ExpandedName::new("", name), Attribute {
        prefix: None,
        value,
      })
    }),
  )
}

fn attribute(node: &NodeRef, name: &str) -> Option<String> {
  node
    .as_element()
    .and_then(|e| e.attributes.borrow().get(name).map(str::to_string))
}

fn set_attribute(node: &NodeRef, name: &str, value: String) {
  if let Some(element) = node.as_element() {
    element.attributes.borrow_mut().insert(name, value);
  }
}

fn move_children(from: &NodeRef, to: &NodeRef) {
  for child in from.children().collect::<Vec<_>>() {
    to.append(child);
  }
}

fn serialize_body(document: &NodeRef) -> String {
  let mut out = Vec::new();
  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      if let Err(e) = child.serialize(&mut out) {
        warn!("Failed to serialize HTML node: {e}");
      }
    }
  }
  String::from_utf8(out).unwrap_or_default()
}
