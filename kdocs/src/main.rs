use color_eyre::eyre::{Context, Result};
use kdocs::{
  build::build_site,
  cli::{Cli, Commands},
};
use kdocs_config::Config;
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      Config::generate_default_config(format, output, *force).wrap_err_with(
        || {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        },
      )?;
      info!(
        "Configuration file created successfully. Edit it to customize your \
         site."
      );
      Ok(())
    },

    Commands::ExportTemplates {
      output_dir,
      force,
      templates,
    } => {
      let written = Config::export_templates(output_dir, *force, templates)
        .wrap_err_with(|| {
          format!("Failed to export templates to {}", output_dir.display())
        })?;
      info!("Exported {} templates", written.len());
      Ok(())
    },

    Commands::Build {
      docs_dir,
      output_dir,
      jobs,
    } => {
      let mut config = load_config(&cli)?;
      if let Some(docs_dir) = docs_dir {
        config.docs_dir.clone_from(docs_dir);
      }
      if let Some(output_dir) = output_dir {
        config.output_dir.clone_from(output_dir);
      }
      if jobs.is_some() {
        config.jobs = *jobs;
      }
      config.validate()?;

      build_site(&config)?;
      Ok(())
    },

    Commands::Serve { address, no_build } => serve(&cli, *address, *no_build),
  }
}

/// Load configuration from the global config file and override options.
fn load_config(cli: &Cli) -> Result<Config> {
  Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")
}

#[cfg(feature = "serve")]
fn serve(cli: &Cli, address: std::net::SocketAddr, no_build: bool) -> Result<()> {
  let config = load_config(cli)?;
  if !no_build {
    build_site(&config)?;
  }
  kdocs::serve::serve(&config.output_dir, address)
}

#[cfg(not(feature = "serve"))]
fn serve(_cli: &Cli, _address: std::net::SocketAddr, _no_build: bool) -> Result<()> {
  color_eyre::eyre::bail!(
    "kdocs was built without the `serve` feature; rebuild with `--features \
     serve`"
  )
}
