use std::fs;

use color_eyre::eyre::{Context, Result};
use kdocs_config::Config;
use kdocs_templates as templates;
use log::debug;

const DEFAULT_CSS: &str = templates::DEFAULT_CSS;

/// Write the stylesheet and copy the configured assets directory into the
/// output root.
///
/// A `style.css` in the template directory replaces the embedded one.
///
/// # Errors
///
/// Returns an error if the stylesheet cannot be read or written or the
/// assets cannot be copied.
pub fn copy_assets(config: &Config) -> Result<()> {
  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;

  let css = match config.template_file("style.css") {
    Some(path) if path.exists() => {
      fs::read_to_string(&path).wrap_err_with(|| {
        format!("Failed to read style.css from: {}", path.display())
      })?
    },
    _ => DEFAULT_CSS.to_string(),
  };
  fs::write(config.output_dir.join("style.css"), css)
    .wrap_err("Failed to write CSS file")?;

  if let Some(custom_assets_dir) = &config.assets_dir
    && custom_assets_dir.is_dir()
  {
    debug!("Copying custom assets from {}", custom_assets_dir.display());

    let options = fs_extra::dir::CopyOptions::new()
      .overwrite(true)
      .content_only(true);
    fs_extra::dir::copy(custom_assets_dir, &config.output_dir, &options)
      .wrap_err("Failed to copy custom assets")?;
  }

  Ok(())
}
