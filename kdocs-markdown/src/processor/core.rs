//! Core implementation of the Markdown processor.
use comrak::{Arena, options::Options, parse_document};
use log::{debug, warn};

use super::{
  postprocess::apply_dom_transformations,
  process::process_safe,
  types::{MarkdownOptions, MarkdownProcessor},
};
use crate::{
  directives::{RewriteContext, rewrite},
  error::DirectiveError,
  headings::extract_headings,
  types::RenderedDocument,
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render already rewritten Markdown to decorated HTML.
  #[must_use]
  pub fn render(&self, markdown: &str) -> String {
    let html = self.convert_to_html(markdown);
    self.postprocess(&html)
  }

  /// Run a document through the whole pipeline: directive rewriting, comrak
  /// conversion, table of contents extraction and HTML decoration.
  ///
  /// Headings are read from comrak's output before decoration, so the
  /// extractor never sees the anchor containers.
  ///
  /// # Errors
  ///
  /// Returns a [`DirectiveError`] when the source contains a malformed
  /// directive.
  pub fn render_document(
    &self,
    markdown: &str,
    context: &RewriteContext<'_>,
    title: &str,
  ) -> Result<RenderedDocument, DirectiveError> {
    let markdown = rewrite(markdown, context)?;
    let raw_html = self.convert_to_html(&markdown);
    let headings =
      extract_headings(&raw_html, title, self.options.toc_depth);
    let html = self.postprocess(&raw_html);

    debug!(
      "Rendered {} with {} table of contents entries",
      context.document_key,
      headings.len()
    );

    Ok(RenderedDocument {
      markdown,
      html,
      headings,
    })
  }

  /// Convert markdown to HTML using comrak and configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html_output = String::new();
    if let Err(e) = comrak::format_html(root, &options, &mut html_output) {
      warn!("Failed to format HTML: {e}");
    }
    html_output
  }

  /// Build comrak options from `MarkdownOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    // Directives expand into raw HTML that has to survive rendering.
    options.render.r#unsafe = true;
    options.extension.header_id_prefix = None;
    options
  }

  fn postprocess(&self, html: &str) -> String {
    process_safe(
      html,
      |html| apply_dom_transformations(html, &self.options),
      html,
    )
  }
}
