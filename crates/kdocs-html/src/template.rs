use std::{fmt::Write, fs};

use html_escape::{encode_double_quoted_attribute, encode_text};
use kdocs_config::{Config, MetaConfig};
use kdocs_markdown::{Heading, LinkPolicy};
use kdocs_navigation::{NavigationNode, NavigationTree};
use kdocs_templates as templates;
use log::debug;
use tera::Tera;

use crate::error::PageError;

pub const PAGE: &str = "page.html";
pub const HOME: &str = "home.html";
pub const NOT_FOUND: &str = "not_found.html";
pub const NAVIGATION: &str = "navigation.html";

/// Compiled page templates.
///
/// Each template is read from the configured template directory when a file
/// with its name exists there, and taken from the embedded defaults
/// otherwise. Template names end in `.html`, so tera escapes every inserted
/// value unless it is marked `safe`.
pub struct Templates {
  tera: Tera,
}

impl Templates {
  /// Load and compile every page template.
  ///
  /// # Errors
  ///
  /// Returns an error if an override cannot be read or a template does not
  /// compile.
  pub fn load(config: &Config) -> Result<Self, PageError> {
    let mut tera = Tera::default();
    for (name, fallback) in [
      (PAGE, templates::PAGE_TEMPLATE),
      (HOME, templates::HOME_TEMPLATE),
      (NOT_FOUND, templates::NOT_FOUND_TEMPLATE),
      (NAVIGATION, templates::NAVIGATION_TEMPLATE),
    ] {
      let content = load_template_content(config, name, fallback)?;
      tera.add_raw_template(name, &content)?;
    }
    Ok(Self { tera })
  }

  /// Render a template by name.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering fails, e.g. because an overriding template
  /// uses a variable that is not provided.
  pub fn render(
    &self,
    name: &str,
    context: &tera::Context,
  ) -> Result<String, PageError> {
    Ok(self.tera.render(name, context)?)
  }
}

/// Read a template override from the template directory, or use `fallback`.
fn load_template_content(
  config: &Config,
  template_name: &str,
  fallback: &str,
) -> Result<String, PageError> {
  if let Some(path) = config.template_file(template_name)
    && path.exists()
  {
    debug!("Using template override {}", path.display());
    return fs::read_to_string(&path)
      .map_err(|source| PageError::Io { path, source });
  }
  Ok(fallback.to_string())
}

/// Generate the table of contents as a flat list; nesting is expressed by a
/// class per heading level.
pub(crate) fn generate_toc(headings: &[Heading]) -> String {
  let mut toc = String::from("<ul class=\"toc\">\n");
  for heading in headings {
    // Writing to String is infallible
    let _ = writeln!(
      toc,
      "<li class=\"toc-item toc-h{}\"><a href=\"#{}\">{}</a></li>",
      heading.level,
      encode_double_quoted_attribute(&heading.id),
      encode_text(&heading.text)
    );
  }
  toc.push_str("</ul>");
  toc
}

/// Generate the sidebar for the whole tree. Groups on the way to `current`
/// are expanded and its leaf is marked active.
pub(crate) fn generate_sidebar(
  tree: &NavigationTree,
  current: Option<&str>,
  links: &LinkPolicy,
) -> String {
  let mut sidebar = String::new();
  write_nodes(&mut sidebar, tree.nodes(), current, links);
  sidebar
}

fn write_nodes(
  out: &mut String,
  nodes: &[NavigationNode],
  current: Option<&str>,
  links: &LinkPolicy,
) {
  out.push_str("<ul class=\"navigation-list\">");
  for node in nodes {
    match node {
      NavigationNode::Group { children, .. } => {
        let expanded = current.is_some_and(|key| contains_key(node, key));
        let _ = write!(
          out,
          "<li class=\"navigation-item group{}\"><span \
           class=\"group-title\">{}</span>",
          if expanded { " expanded" } else { "" },
          encode_text(node.title())
        );
        write_nodes(out, children, current, links);
        out.push_str("</li>");
      },
      NavigationNode::Leaf { href, enabled, .. } => {
        let mut class = String::from("navigation-item leaf");
        if !enabled {
          class.push_str(" disabled");
        }
        if current == Some(href.as_str()) {
          class.push_str(" active");
        }

        let title = encode_text(node.title());
        if *enabled {
          let _ = write!(
            out,
            "<li class=\"{class}\"><a href=\"{}\">{title}</a></li>",
            encode_double_quoted_attribute(&links.local_url(href))
          );
        } else {
          let _ = write!(out, "<li class=\"{class}\"><span>{title}</span></li>");
        }
      },
    }
  }
  out.push_str("</ul>");
}

fn contains_key(node: &NavigationNode, key: &str) -> bool {
  match node {
    NavigationNode::Group { children, .. } => {
      children.iter().any(|child| contains_key(child, key))
    },
    NavigationNode::Leaf { href, .. } => href == key,
  }
}

/// Body of the documentation home: one section per top-level group listing
/// its documents.
pub(crate) fn generate_home_index(
  tree: &NavigationTree,
  site_title: &str,
  home_key: &str,
  links: &LinkPolicy,
) -> String {
  let mut html = format!("<h1 class=\"home-title\">{}</h1>\n", encode_text(site_title));

  let loose = tree
    .nodes()
    .iter()
    .filter(|node| node.is_leaf() && node.href() != Some(home_key))
    .collect::<Vec<_>>();
  if !loose.is_empty() {
    html.push_str("<section class=\"home-section\">\n");
    write_home_items(&mut html, &loose, links);
    html.push_str("</section>\n");
  }

  for group in tree.nodes().iter().filter(|node| !node.is_leaf()) {
    let mut leaves = Vec::new();
    collect_leaves(group.children(), &mut leaves);
    let _ = writeln!(
      html,
      "<section class=\"home-section\">\n<h2>{}</h2>",
      encode_text(group.title())
    );
    write_home_items(&mut html, &leaves, links);
    html.push_str("</section>\n");
  }

  html
}

fn collect_leaves<'a>(nodes: &'a [NavigationNode], out: &mut Vec<&'a NavigationNode>) {
  for node in nodes {
    if node.is_leaf() {
      out.push(node);
    } else {
      collect_leaves(node.children(), out);
    }
  }
}

fn write_home_items(out: &mut String, leaves: &[&NavigationNode], links: &LinkPolicy) {
  out.push_str("<ul class=\"home-items\">\n");
  for leaf in leaves {
    let title = encode_text(leaf.display_title());
    match leaf.href() {
      Some(href) if leaf.is_enabled() => {
        let _ = writeln!(
          out,
          "<li class=\"home-item\"><a href=\"{}\">{title}</a></li>",
          encode_double_quoted_attribute(&links.local_url(href))
        );
      },
      _ => {
        let _ = writeln!(out, "<li class=\"home-item disabled\">{title}</li>");
      },
    }
  }
  out.push_str("</ul>\n");
}

/// `OpenGraph` and Twitter card tags for a page titled `title`.
pub(crate) fn generate_meta_tags(meta: &MetaConfig, title: &str) -> String {
  let mut tags = vec![
    ("name", "description", meta.description.as_str()),
    ("property", "og:title", title),
    ("property", "og:description", meta.description.as_str()),
    ("property", "og:site_name", meta.site_name.as_str()),
    ("property", "og:locale", meta.locale.as_str()),
    ("property", "og:type", "website"),
    ("name", "twitter:card", "summary_large_image"),
    ("name", "twitter:title", title),
    ("name", "twitter:description", meta.description.as_str()),
  ];
  if let Some(image) = &meta.image {
    tags.push(("property", "og:image", image.as_str()));
    tags.push(("name", "twitter:image", image.as_str()));
  }
  if let Some(site) = &meta.twitter_site {
    tags.push(("name", "twitter:site", site.as_str()));
  }
  if let Some(creator) = &meta.twitter_creator {
    tags.push(("name", "twitter:creator", creator.as_str()));
  }

  tags
    .iter()
    .map(|(attribute, key, value)| {
      format!(
        "<meta {attribute}=\"{key}\" content=\"{}\" />",
        encode_double_quoted_attribute(value)
      )
    })
    .collect::<Vec<_>>()
    .join("\n    ")
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use kdocs_navigation::RawDocument;

  use super::*;

  fn tree() -> NavigationTree {
    let raw = vec![
      RawDocument::leaf("홈", "home"),
      RawDocument::group("개념", vec![
        RawDocument::leaf("기본 문법", "basic-syntax.md"),
        RawDocument::group("타입", vec![RawDocument::leaf(
          "숫자",
          "numbers.md",
        )]),
      ]),
    ];
    NavigationTree::build(&raw, |key| key == "basic-syntax.md", "home").unwrap()
  }

  #[test]
  fn toc_lists_every_heading_with_its_level() {
    let toc = generate_toc(&[
      Heading {
        level: 1,
        text:  "A & B".to_string(),
        id:    "A-&-B".to_string(),
      },
      Heading {
        level: 2,
        text:  "x".to_string(),
        id:    "x".to_string(),
      },
    ]);
    assert!(toc.contains(
      "<li class=\"toc-item toc-h1\"><a href=\"#A-&amp;-B\">A &amp; B</a></li>"
    ));
    assert!(toc.contains("<li class=\"toc-item toc-h2\"><a href=\"#x\">x</a></li>"));
  }

  #[test]
  fn sidebar_marks_active_and_disabled_documents() {
    let sidebar =
      generate_sidebar(&tree(), Some("basic-syntax.md"), &LinkPolicy::default());

    assert!(sidebar.contains(
      "<li class=\"navigation-item leaf active\"><a \
       href=\"/docs/basic-syntax.md\">기본 문법</a></li>"
    ));
    assert!(sidebar.contains(
      "<li class=\"navigation-item leaf disabled\"><span>숫자</span></li>"
    ));
    assert!(sidebar.contains("navigation-item group expanded"));
    assert_eq!(sidebar.matches("expanded").count(), 1);
  }

  #[test]
  fn home_index_lists_group_documents() {
    let html =
      generate_home_index(&tree(), "Kotlin 문서", "home", &LinkPolicy::default());
    assert!(html.starts_with("<h1 class=\"home-title\">Kotlin 문서</h1>"));
    assert!(html.contains("<h2>개념</h2>"));
    assert!(html.contains("<a href=\"/docs/basic-syntax.md\">기본 문법</a>"));
    assert!(html.contains("<li class=\"home-item disabled\">숫자</li>"));
    assert!(!html.contains(">홈<"));
  }

  #[test]
  fn meta_tags_are_escaped() {
    let tags = generate_meta_tags(&MetaConfig::default(), "\"A\" | Kotlin 문서");
    assert!(tags.contains(
      "<meta property=\"og:title\" content=\"&quot;A&quot; | Kotlin 문서\" />"
    ));
    assert!(tags.contains("<meta name=\"twitter:card\" content=\"summary_large_image\" />"));
    assert!(tags.contains("<meta name=\"twitter:site\" content=\"@kotlin\" />"));
  }

  #[test]
  fn overrides_replace_embedded_templates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(NOT_FOUND), "missing: {{ title }}").unwrap();
    let config = Config {
      template_dir: Some(dir.path().to_path_buf()),
      ..Config::default()
    };

    let templates = Templates::load(&config).unwrap();
    let mut context = tera::Context::new();
    context.insert("title", "<404>");
    assert_eq!(
      templates.render(NOT_FOUND, &context).unwrap(),
      "missing: &lt;404&gt;"
    );
  }
}
