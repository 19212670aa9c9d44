//! Page assembly for the kdocs site.
//!
//! [`SiteRenderer`] turns a document key into a [`PageOutcome`]: a rendered
//! document, the "not yet translated" placeholder, the documentation home or
//! not found. Pages are rendered through tera templates that can be
//! overridden from the configured template directory.
pub mod error;
pub mod page;
pub mod sitemap;
pub mod template;

pub use error::PageError;
pub use page::{Page, PageBody, PageOutcome, SiteRenderer};
pub use sitemap::{SitemapEntry, collect_entries, render_sitemap};
pub use template::Templates;
