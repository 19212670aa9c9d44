//! Document transform pipeline: from a key to a rendered page.
use std::{collections::HashSet, fs, path::PathBuf};

use jiff::tz::TimeZone;
use kdocs_config::Config;
use kdocs_markdown::{
  Heading,
  LinkPolicy,
  MarkdownProcessor,
  RewriteContext,
  headings::heading_id,
};
use kdocs_navigation::{
  Catalog,
  DocumentStore,
  NavigationNode,
  NavigationTree,
  RawDocument,
  locate_exceptional,
};
use kdocs_utils::{format_last_modified, last_commit_time, resolve_time_zone};
use log::debug;

use crate::{
  error::PageError,
  template::{
    self,
    Templates,
    generate_home_index,
    generate_meta_tags,
    generate_sidebar,
    generate_toc,
  },
};

/// What the body of a page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
  /// The documentation home listing.
  Home,
  /// The content file is missing; the page invites contributions instead.
  Placeholder,
  /// Rendered document HTML.
  Document(String),
}

/// An assembled page, ready to be rendered through the page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub key:            String,
  /// Value of the `<title>` element.
  pub title:          String,
  pub document_title: String,
  /// Titles from the top-level group down to the document.
  pub breadcrumbs:    Vec<String>,
  /// Table of contents, starting with the document title.
  pub headings:       Vec<Heading>,
  pub body:           PageBody,
  /// Date of the last commit touching the content file.
  pub last_modified:  Option<String>,
  pub edit_link:      Option<String>,
}

/// Result of looking a key up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
  Page(Box<Page>),
  NotFound,
}

/// Renders pages for one build.
///
/// Holds only shared, immutable state, so a single renderer can be used from
/// every worker thread.
pub struct SiteRenderer<'a, S: DocumentStore + ?Sized> {
  config:     &'a Config,
  tree:       &'a NavigationTree,
  exceptions: &'a [RawDocument],
  catalog:    Catalog<'a, S>,
  links:      LinkPolicy,
  processor:  MarkdownProcessor,
  templates:  Templates,
  time_zone:  TimeZone,
}

impl<'a, S: DocumentStore + ?Sized> SiteRenderer<'a, S> {
  /// Create a renderer, compiling the page templates.
  ///
  /// # Errors
  ///
  /// Returns an error if a template cannot be loaded.
  pub fn new(
    config: &'a Config,
    tree: &'a NavigationTree,
    exceptions: &'a [RawDocument],
    store: &'a S,
  ) -> Result<Self, PageError> {
    Ok(Self {
      config,
      tree,
      exceptions,
      catalog: Catalog::new(tree, store),
      links: config.link_policy(),
      processor: MarkdownProcessor::new(config.markdown_options()),
      templates: Templates::load(config)?,
      time_zone: resolve_time_zone(&config.time_zone),
    })
  }

  /// Assemble the page for `key`.
  ///
  /// Keys other than the home key must end in `.md`. The key is looked up in
  /// the navigation tree first and among the exceptional documents second.
  ///
  /// # Errors
  ///
  /// Returns [`PageError::Directive`] when the document contains a malformed
  /// directive, and [`PageError::Io`] when an existing content file cannot be
  /// read.
  pub fn assemble(&self, key: &str) -> Result<PageOutcome, PageError> {
    let home_key = self.config.home_key.as_str();
    if key != home_key && !key.ends_with(".md") {
      return Ok(PageOutcome::NotFound);
    }

    let (node, breadcrumbs) = if let Some(location) = self.tree.locate(key) {
      let breadcrumbs = location
        .breadcrumbs()
        .iter()
        .map(|node| node.title().to_string())
        .collect();
      (location.node().clone(), breadcrumbs)
    } else if let Some(node) = locate_exceptional(self.exceptions, key) {
      let breadcrumbs = vec![node.title().to_string()];
      (node, breadcrumbs)
    } else {
      debug!("No navigation entry for {key}");
      return Ok(PageOutcome::NotFound);
    };

    let document_title = node.display_title().to_string();
    let title_heading = Heading {
      level: 1,
      text:  document_title.clone(),
      id:    heading_id(&document_title),
    };

    let mut page = Page {
      key: key.to_string(),
      title: format!("{document_title} | {}", self.config.site_title),
      document_title,
      breadcrumbs,
      headings: vec![title_heading],
      body: PageBody::Placeholder,
      last_modified: None,
      edit_link: None,
    };

    if key == home_key {
      page.title.clone_from(&self.config.site_title);
      page.body = PageBody::Home;
      return Ok(PageOutcome::Page(Box::new(page)));
    }

    let store = self.catalog.store();
    if !store.exists(key) {
      debug!("{key} is not translated yet");
      return Ok(PageOutcome::Page(Box::new(page)));
    }

    let markdown = store.read(key).map_err(|source| {
      PageError::Io {
        path: store
          .source_path(key)
          .unwrap_or_else(|| PathBuf::from(key)),
        source,
      }
    })?;

    let context = RewriteContext::new(key, &self.catalog, &self.links);
    let rendered = self
      .processor
      .render_document(&markdown, &context, &page.document_title)
      .map_err(|source| {
        PageError::Directive {
          key: key.to_string(),
          source,
        }
      })?;

    page.headings = rendered.headings;
    page.body = PageBody::Document(rendered.html);
    page.last_modified = self.last_modified(key);
    page.edit_link = self.config.edit_url.as_deref().map(|base| {
      format!("{}/{key}", base.trim_end_matches('/'))
    });

    Ok(PageOutcome::Page(Box::new(page)))
  }

  /// Render an assembled page through the page template.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render(&self, page: &Page) -> Result<String, PageError> {
    let content = match &page.body {
      PageBody::Home => {
        generate_home_index(
          self.tree,
          &self.config.site_title,
          &self.config.home_key,
          &self.links,
        )
      },
      PageBody::Placeholder => String::new(),
      PageBody::Document(html) => html.clone(),
    };

    let mut context = self.base_context(&page.title);
    context.insert(
      "navigation_html",
      &self.navigation_html(Some(&page.key), true)?,
    );
    context.insert("document_title", &page.document_title);
    context.insert(
      "title_id",
      &page.headings.first().map_or("", |heading| heading.id.as_str()),
    );
    context.insert("breadcrumbs", &page.breadcrumbs);
    context.insert("toc_html", &generate_toc(&page.headings));
    context.insert("content", &content);
    context.insert("is_home", &matches!(page.body, PageBody::Home));
    context.insert("placeholder", &matches!(page.body, PageBody::Placeholder));
    context.insert("last_modified", &page.last_modified);
    context.insert("edit_link", &page.edit_link);

    self.templates.render(template::PAGE, &context)
  }

  /// Assemble and render `key`; `None` when the key is not found.
  ///
  /// # Errors
  ///
  /// See [`SiteRenderer::assemble`] and [`SiteRenderer::render`].
  pub fn render_key(&self, key: &str) -> Result<Option<String>, PageError> {
    match self.assemble(key)? {
      PageOutcome::Page(page) => self.render(&page).map(Some),
      PageOutcome::NotFound => Ok(None),
    }
  }

  /// Render the site root: the landing page with the README, if configured.
  ///
  /// # Errors
  ///
  /// Returns an error if the README cannot be read or a template fails to
  /// render.
  pub fn render_landing(&self) -> Result<String, PageError> {
    let readme_html = match &self.config.readme_path {
      Some(path) => {
        let markdown = fs::read_to_string(path).map_err(|source| {
          PageError::Io {
            path: path.clone(),
            source,
          }
        })?;
        Some(self.processor.render(&markdown))
      },
      None => None,
    };

    let mut context = self.base_context(&self.config.site_title);
    context.insert("navigation_html", &self.navigation_html(None, false)?);
    context.insert("readme_html", &readme_html);

    self.templates.render(template::HOME, &context)
  }

  /// Render the not found page.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_not_found(&self) -> Result<String, PageError> {
    let mut context =
      self.base_context(&format!("404 | {}", self.config.site_title));
    context.insert("navigation_html", &self.navigation_html(None, false)?);

    self.templates.render(template::NOT_FOUND, &context)
  }

  /// Last-modified date of a document, when source control knows it.
  fn last_modified(&self, key: &str) -> Option<String> {
    if !self.config.source_control {
      return None;
    }
    let path = self.catalog.store().source_path(key)?;
    last_commit_time(&path)
      .map(|timestamp| format_last_modified(timestamp, &self.time_zone))
  }

  fn base_context(&self, title: &str) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("title", title);
    context.insert("site_title", &self.config.site_title);
    context.insert("meta", &self.config.meta);
    context.insert(
      "meta_tags_html",
      &generate_meta_tags(&self.config.meta, title),
    );
    context.insert("docs_home_url", &self.links.local_url(&self.config.home_key));
    context
  }

  fn navigation_html(
    &self,
    current: Option<&str>,
    with_sidebar: bool,
  ) -> Result<String, PageError> {
    let mut context = tera::Context::new();
    context.insert("site_title", &self.config.site_title);
    context.insert("docs_home_url", &self.links.local_url(&self.config.home_key));
    let sidebar = if with_sidebar {
      generate_sidebar(self.tree, current, &self.links)
    } else {
      String::new()
    };
    context.insert("sidebar_html", &sidebar);

    self.templates.render(template::NAVIGATION, &context)
  }

  /// Every key that gets its own page: the flattened tree followed by the
  /// exceptional documents, without duplicates.
  #[must_use]
  pub fn page_keys(&self) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let exceptional = self
      .exceptions
      .iter()
      .filter_map(|record| record.href.as_deref());
    self
      .tree
      .flatten()
      .into_iter()
      .filter_map(NavigationNode::href)
      .chain(exceptional)
      .filter(|key| seen.insert(*key))
      .collect()
  }
}
