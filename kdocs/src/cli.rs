use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for kdocs
#[derive(Parser, Debug)]
#[command(author, version, about = "kdocs: Kotlin 문서 번역 사이트 생성기")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the kdocs CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render every document into the output directory.
  Build {
    /// Directory containing the translated markdown documents.
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for rendering.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Initialize a new kdocs configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "kdocs.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export default templates to a directory for customization.
  ExportTemplates {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,

    /// Specific templates to export (e.g. page.html, style.css). If not
    /// specified, exports all.
    #[arg(short, long, action = clap::ArgAction::Append)]
    templates: Vec<String>,
  },

  /// Build, then serve the output directory for local preview. Requires the
  /// `serve` feature.
  Serve {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    address: std::net::SocketAddr,

    /// Serve the existing output without building first.
    #[arg(long)]
    no_build: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
