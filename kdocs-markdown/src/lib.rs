//! # kdocs-markdown
//!
//! Markdown pipeline for the kdocs documentation site. Translated documents
//! are authored in GitHub Flavored Markdown with a handful of bracket
//! delimited directives (`{^[1]}`, `{-}`, `{>tip}`, `{~>next.md}`, ...). This
//! crate expands those directives into plain HTML fragments, renders the
//! result with `comrak` and extracts the table of contents from the produced
//! HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use kdocs_markdown::{
//!   DocumentCatalog,
//!   LinkPolicy,
//!   MarkdownOptions,
//!   MarkdownProcessor,
//!   RewriteContext,
//! };
//!
//! struct Empty;
//!
//! impl DocumentCatalog for Empty {
//!   fn title_of(&self, _key: &str) -> Option<&str> {
//!     None
//!   }
//!
//!   fn exists(&self, _key: &str) -> bool {
//!     true
//!   }
//! }
//!
//! let links = LinkPolicy::default();
//! let context = RewriteContext::new("intro.md", &Empty, &links);
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//!
//! let document = processor
//!   .render_document("# Intro\n\nSee {^[1]}.", &context, "Intro")
//!   .unwrap();
//!
//! assert!(document.html.contains("Intro-ref-1"));
//! assert_eq!(document.headings[0].text, "Intro");
//! ```
//!
//! ## Directives
//!
//! | Marker | Meaning |
//! |---|---|
//! | `{^[N]}` / `{&[N]}` | footnote reference / content |
//! | `{&?url}` / `{&?}` | survey link |
//! | `{-}` / `{/-}` | tab host |
//! | `{--title--id}` / `{/--id}` | tab item |
//! | `{>variant}` | block quote variant |
//! | `{*large-spacing}` / `{*compact}` | list spacing |
//! | `{~}` / `{/~}` | document pager |
//! | `{<~key}` / `{~>key}` | previous / next document |
//! | `{#anchor}` | original anchor id of a heading |

pub mod directives;
mod error;
pub mod headings;
pub mod processor;
mod types;
pub mod utils;

pub use crate::{
  directives::{DocumentCatalog, LinkPolicy, RewriteContext, rewrite},
  error::{DirectiveError, FootnoteKind},
  headings::extract_headings,
  processor::{MarkdownOptions, MarkdownProcessor},
  types::{Heading, RenderedDocument},
};
