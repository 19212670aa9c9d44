//! The site build: every page, the landing and not found pages, the sitemap
//! and assets.
use color_eyre::eyre::{Context, Result};
use kdocs_config::Config;
use kdocs_html::{
  PageBody,
  PageOutcome,
  SiteRenderer,
  collect_entries,
  render_sitemap,
};
use kdocs_navigation::{
  DocumentStore,
  FsDocumentStore,
  NavigationTree,
  load_manifest,
};
use kdocs_utils::{copy_assets, last_commit_time, page_output_path, write_output};
use log::{debug, info, warn};
use rayon::prelude::*;

/// Counts reported once a build finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  /// Pages with rendered content, including the documentation home.
  pub documents:    usize,
  /// Pages showing the "not yet translated" placeholder.
  pub placeholders: usize,
  /// Entries written to `sitemap.xml`.
  pub sitemap:      usize,
}

#[derive(Clone, Copy)]
enum Rendered {
  Document,
  Placeholder,
  Skipped,
}

/// Build the whole site into `config.output_dir`.
///
/// Pages are rendered on a dedicated rayon pool with `config.jobs` threads
/// (all cores by default). The first malformed document aborts the build.
///
/// # Errors
///
/// Returns an error if an input is missing or malformed, a document contains
/// a malformed directive, or an output cannot be written.
pub fn build_site(config: &Config) -> Result<BuildSummary> {
  info!("Starting site build...");
  config.validate_paths()?;

  let raw = load_manifest(&config.registry_path)?;
  let exceptions = match &config.exceptions_path {
    Some(path) => load_manifest(path)?,
    None => Vec::new(),
  };

  let store = FsDocumentStore::new(&config.docs_dir);
  let tree =
    NavigationTree::build(&raw, |key| store.exists(key), &config.home_key)?;
  let renderer = SiteRenderer::new(config, &tree, &exceptions, &store)
    .wrap_err("Failed to load page templates")?;

  let keys = renderer.page_keys();
  info!("Rendering {} pages", keys.len());

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to create the render thread pool")?;

  let rendered = pool.install(|| {
    keys
      .par_iter()
      .map(|key| render_page(config, &renderer, key))
      .collect::<Result<Vec<_>>>()
  })?;

  let mut summary = BuildSummary::default();
  for outcome in rendered {
    match outcome {
      Rendered::Document => summary.documents += 1,
      Rendered::Placeholder => summary.placeholders += 1,
      Rendered::Skipped => {},
    }
  }

  write_output(
    &config.output_dir.join("index.html"),
    &renderer.render_landing()?,
  )?;
  write_output(
    &config.output_dir.join("404.html"),
    &renderer.render_not_found()?,
  )?;

  let entries = collect_entries(
    &config.site_url,
    &config.home_key,
    &config.link_policy(),
    keys.iter().copied(),
    |key| store.exists(key),
    |key| {
      if config.source_control {
        store.source_path(key).and_then(|path| last_commit_time(&path))
      } else {
        None
      }
    },
  );
  summary.sitemap = entries.len();
  write_output(
    &config.output_dir.join("sitemap.xml"),
    &render_sitemap(&entries),
  )?;

  copy_assets(config)?;

  info!(
    "Built {} documents and {} placeholders into {}",
    summary.documents,
    summary.placeholders,
    config.output_dir.display()
  );
  Ok(summary)
}

fn render_page(
  config: &Config,
  renderer: &SiteRenderer<'_, FsDocumentStore>,
  key: &str,
) -> Result<Rendered> {
  let Some(output) = page_output_path(&config.output_dir, key) else {
    warn!("Skipping {key}: key leaves the output directory");
    return Ok(Rendered::Skipped);
  };

  let page = match renderer
    .assemble(key)
    .wrap_err_with(|| format!("Failed to render document {key}"))?
  {
    PageOutcome::Page(page) => page,
    PageOutcome::NotFound => {
      warn!("Skipping {key}: not a document key");
      return Ok(Rendered::Skipped);
    },
  };

  let html = renderer
    .render(&page)
    .wrap_err_with(|| format!("Failed to render template for {key}"))?;
  write_output(&output, &html)?;
  debug!("Wrote {key}");

  Ok(match page.body {
    PageBody::Placeholder => Rendered::Placeholder,
    PageBody::Home | PageBody::Document(_) => Rendered::Document,
  })
}
