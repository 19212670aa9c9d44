use std::{
  fs,
  path::{Path, PathBuf},
};

use kdocs_markdown::{LinkPolicy, MarkdownOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::ConfigError, meta::MetaConfig, overrides};

/// File names searched for when no config file is given explicitly.
pub const CONFIG_FILENAMES: [&str; 6] = [
  "kdocs.toml",
  "kdocs.json",
  ".kdocs.toml",
  ".kdocs.json",
  ".config/kdocs.toml",
  ".config/kdocs.json",
];

/// Configuration for the kdocs site generator.
///
/// Fields are loaded from TOML or JSON config files, then adjusted through
/// `--config KEY=VALUE` overrides and subcommand flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory containing the translated markdown documents.
  pub docs_dir: PathBuf,

  /// Navigation manifest.
  pub registry_path: PathBuf,

  /// Documents that exist outside the navigation tree.
  pub exceptions_path: Option<PathBuf>,

  /// Markdown rendered on the site root page.
  pub readme_path: Option<PathBuf>,

  /// Output directory for the generated site.
  pub output_dir: PathBuf,

  /// Directory with template overrides.
  pub template_dir: Option<PathBuf>,

  /// Directory copied verbatim into the output.
  pub assets_dir: Option<PathBuf>,

  /// Site name, used in every page title.
  pub site_title: String,

  /// Absolute URL the site is served from, used in the sitemap.
  pub site_url: String,

  /// Key of the documentation home page.
  pub home_key: String,

  /// Path prefix of local document links.
  pub local_link_prefix: String,

  /// Upstream documentation untranslated documents link to.
  pub fallback_base_url: String,

  /// Links starting with this prefix are styled as API references.
  pub api_doc_prefix: String,

  /// Deepest heading level in the table of contents.
  pub toc_depth: u8,

  /// Number of threads to use for rendering.
  pub jobs: Option<usize>,

  /// IANA time zone for last-modified dates.
  pub time_zone: String,

  /// Whether to read last-modified dates from git.
  pub source_control: bool,

  /// Base URL of "edit this page" links; the document key is appended.
  pub edit_url: Option<String>,

  /// Page metadata.
  pub meta: MetaConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      docs_dir:          PathBuf::from("docs"),
      registry_path:     PathBuf::from("docs/registry.json"),
      exceptions_path:   None,
      readme_path:       None,
      output_dir:        PathBuf::from("build"),
      template_dir:      None,
      assets_dir:        None,
      site_title:        "Kotlin 문서".to_string(),
      site_url:          "https://kdocs-kr.hoonkun.kiwi".to_string(),
      home_key:          "home".to_string(),
      local_link_prefix: "/docs/".to_string(),
      fallback_base_url: "https://kotlinlang.org/docs".to_string(),
      api_doc_prefix:    "https://kotlinlang.org/".to_string(),
      toc_depth:         3,
      jobs:              None,
      time_zone:         "Asia/Seoul".to_string(),
      source_control:    true,
      edit_url:          None,
      meta:              MetaConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from a single file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format
  /// is unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let mut root = Self::default_value()?;
    overrides::merge_values(&mut root, read_value(path.as_ref())?);
    Self::from_value(root)
  }

  /// Load configuration from files and `KEY=VALUE` overrides.
  ///
  /// Files are applied in order, later ones winning; without files a
  /// config file in the current directory is used if one exists.
  /// Overrides are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid or
  /// the result fails [`Config::validate`].
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut root = Self::default_value()?;

    if config_files.is_empty() {
      if let Some(discovered) = std::env::current_dir()
        .ok()
        .and_then(|dir| Self::find_config_file(&dir))
      {
        log::info!("Using discovered config file: {}", discovered.display());
        overrides::merge_values(&mut root, read_value(&discovered)?);
      }
    } else {
      for path in config_files {
        overrides::merge_values(&mut root, read_value(path)?);
      }
      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
    }

    for override_str in config_overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Invalid(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;
      overrides::apply_override(&mut root, key.trim(), value.trim())?;
    }

    let config = Self::from_value(root)?;
    config.validate()?;
    Ok(config)
  }

  /// Search `dir` for a config file with one of [`CONFIG_FILENAMES`].
  #[must_use]
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Check values that have a fixed shape.
  ///
  /// # Errors
  ///
  /// Returns every problem found, one per line.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if !(1..=6).contains(&self.toc_depth) {
      errors.push(format!(
        "toc_depth must be between 1 and 6, got {}",
        self.toc_depth
      ));
    }

    for (key, url) in [
      ("site_url", &self.site_url),
      ("fallback_base_url", &self.fallback_base_url),
      ("api_doc_prefix", &self.api_doc_prefix),
    ] {
      if !(url.starts_with("https://") || url.starts_with("http://")) {
        errors.push(format!("{key} must be an http(s) URL, got '{url}'"));
      }
    }

    if !self.local_link_prefix.starts_with('/')
      || !self.local_link_prefix.ends_with('/')
    {
      errors.push(format!(
        "local_link_prefix must start and end with '/', got '{}'",
        self.local_link_prefix
      ));
    }

    if self.home_key.trim().is_empty() {
      errors.push("home_key must not be empty".to_string());
    }

    if self.jobs == Some(0) {
      errors.push("jobs must be at least 1".to_string());
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Invalid(format!(
        "Configuration validation errors:\n{}",
        errors.join("\n")
      )))
    }
  }

  /// Validate all paths specified in the configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any configured path does not exist or has the wrong
  /// kind.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    check_dir(&mut errors, "Docs directory", Some(&self.docs_dir));
    check_file(&mut errors, "Registry file", Some(&self.registry_path));
    check_file(
      &mut errors,
      "Exceptions file",
      self.exceptions_path.as_deref(),
    );
    check_file(&mut errors, "README file", self.readme_path.as_deref());
    check_dir(
      &mut errors,
      "Template directory",
      self.template_dir.as_deref(),
    );
    check_dir(&mut errors, "Assets directory", self.assets_dir.as_deref());

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Invalid(format!(
        "Configuration path validation errors:\n{}",
        errors.join("\n")
      )))
    }
  }

  /// Path of a template override, if a template directory is configured.
  ///
  /// This method does not check if the returned path exists.
  #[must_use]
  pub fn template_file(&self, name: &str) -> Option<PathBuf> {
    self.template_dir.as_ref().map(|dir| dir.join(name))
  }

  /// Link mapping used by the directive rewriter.
  #[must_use]
  pub fn link_policy(&self) -> LinkPolicy {
    LinkPolicy {
      local_prefix:      self.local_link_prefix.clone(),
      fallback_base_url: self.fallback_base_url.clone(),
    }
  }

  /// Options for the markdown processor.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptions {
      toc_depth: self.toc_depth,
      api_doc_prefix: self.api_doc_prefix.clone(),
      ..MarkdownOptions::default()
    }
  }

  /// Generate a default configuration file with commented explanations.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported, the file exists and
  /// `force` is not set, or the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
    force: bool,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    if path.exists() && !force {
      return Err(ConfigError::Invalid(format!(
        "Config file {} already exists. Use --force to overwrite.",
        path.display()
      )));
    }

    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }

    fs::write(path, config_content).map_err(|source| {
      ConfigError::Write {
        path: path.to_path_buf(),
        source,
      }
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export embedded templates to a directory for customization.
  ///
  /// `templates` restricts the export to the named files.
  ///
  /// # Errors
  ///
  /// Returns an error if the output directory cannot be created, a requested
  /// template does not exist or a template cannot be written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
    templates: &[String],
  ) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(output_dir).map_err(|source| {
      ConfigError::Write {
        path: output_dir.to_path_buf(),
        source,
      }
    })?;

    let all_templates = kdocs_templates::all_templates();
    if let Some(unknown) = templates
      .iter()
      .find(|name| !all_templates.contains_key(name.as_str()))
    {
      return Err(ConfigError::Template(format!(
        "Unknown template '{unknown}'"
      )));
    }

    let mut written = Vec::new();
    for (filename, content) in all_templates {
      if !templates.is_empty() && !templates.iter().any(|t| t == filename) {
        continue;
      }

      let file_path = output_dir.join(filename);
      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|source| {
        ConfigError::Write {
          path: file_path.clone(),
          source,
        }
      })?;
      log::info!("Exported template: {}", file_path.display());
      written.push(file_path);
    }

    Ok(written)
  }

  fn default_value() -> Result<Value, ConfigError> {
    Ok(serde_json::to_value(Self::default())?)
  }

  fn from_value(root: Value) -> Result<Self, ConfigError> {
    serde_json::from_value(root).map_err(|e| {
      ConfigError::Invalid(format!("Invalid configuration: {e}"))
    })
  }
}

fn read_value(path: &Path) -> Result<Value, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| {
    ConfigError::Read {
      path: path.to_path_buf(),
      source,
    }
  })?;
  let parse_error = |message: String| {
    ConfigError::Parse {
      path: path.to_path_buf(),
      message,
    }
  };

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(str::to_lowercase);
  match extension.as_deref() {
    Some("json") => {
      serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    },
    Some("toml") => {
      toml::from_str(&content).map_err(|e| parse_error(e.to_string()))
    },
    _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
  }
}

fn check_file(errors: &mut Vec<String>, what: &str, path: Option<&Path>) {
  let Some(path) = path else {
    return;
  };
  if !path.exists() {
    errors.push(format!("{what} does not exist: {}", path.display()));
  } else if !path.is_file() {
    errors.push(format!("{what} is not a file: {}", path.display()));
  }
}

fn check_dir(errors: &mut Vec<String>, what: &str, path: Option<&Path>) {
  let Some(path) = path else {
    return;
  };
  if !path.exists() {
    errors.push(format!("{what} does not exist: {}", path.display()));
  } else if !path.is_dir() {
    errors.push(format!("{what} is not a directory: {}", path.display()));
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
  }

  #[test]
  fn later_files_only_override_what_they_set() {
    let dir = tempfile::tempdir().unwrap();
    let first = write(
      dir.path(),
      "base.toml",
      "site_title = \"Base\"\ntoc_depth = 2\n[meta]\nlocale = \"en_US\"\n",
    );
    let second = write(
      dir.path(),
      "local.json",
      r#"{"site_title": "Local", "meta": {"site_name": "Local Help"}}"#,
    );

    let config = Config::load(&[first, second], &[]).unwrap();
    assert_eq!(config.site_title, "Local");
    assert_eq!(config.toc_depth, 2);
    assert_eq!(config.meta.locale, "en_US");
    assert_eq!(config.meta.site_name, "Local Help");
    assert_eq!(config.home_key, "home");
  }

  #[test]
  fn overrides_win_over_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "kdocs.toml", "toc_depth = 2\njobs = 2\n");

    let config = Config::load(&[file], &[
      "toc_depth=4".to_string(),
      "jobs=8".to_string(),
      "source_control=off".to_string(),
      "meta.locale = en_US".to_string(),
      "template_dir=custom".to_string(),
    ])
    .unwrap();

    assert_eq!(config.toc_depth, 4);
    assert_eq!(config.jobs, Some(8));
    assert!(!config.source_control);
    assert_eq!(config.meta.locale, "en_US");
    assert_eq!(config.template_dir, Some(PathBuf::from("custom")));
  }

  #[test]
  fn invalid_override_format_is_reported() {
    let err = Config::load(&[], &["no_equals_sign".to_string()]).unwrap_err();
    assert!(err.to_string().contains("Expected KEY=VALUE"));
  }

  #[test]
  fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "kdocs.yaml", "toc_depth: 2");
    let err = Config::from_file(&file).unwrap_err();
    assert!(err.to_string().contains("Unsupported config file format"));
  }

  #[test]
  fn wrong_types_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "kdocs.json", r#"{"toc_depth": "deep"}"#);
    let err = Config::from_file(&file).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
  }

  #[test]
  fn validate_collects_every_problem() {
    let mut config = Config::default();
    config.toc_depth = 7;
    config.site_url = "kdocs.example".to_string();
    config.local_link_prefix = "docs".to_string();
    config.jobs = Some(0);

    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("toc_depth"));
    assert!(message.contains("site_url"));
    assert!(message.contains("local_link_prefix"));
    assert!(message.contains("jobs"));
    assert!(Config::default().validate().is_ok());
  }

  #[test]
  fn validate_paths_reports_missing_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.docs_dir = dir.path().join("docs");
    config.registry_path = dir.path().join("registry.json");

    let message = config.validate_paths().unwrap_err().to_string();
    assert!(message.contains("Docs directory does not exist"));
    assert!(message.contains("Registry file does not exist"));

    fs::create_dir(&config.docs_dir).unwrap();
    fs::write(&config.registry_path, "[]").unwrap();
    assert!(config.validate_paths().is_ok());
  }

  #[test]
  fn finds_config_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::find_config_file(dir.path()).is_none());

    let path = write(dir.path(), ".kdocs.json", "{}");
    assert_eq!(Config::find_config_file(dir.path()), Some(path));
  }

  #[test]
  fn derived_options_follow_config() {
    let mut config = Config::default();
    config.toc_depth = 2;
    config.local_link_prefix = "/ko/".to_string();

    assert_eq!(config.markdown_options().toc_depth, 2);
    assert_eq!(config.link_policy().local_url("a.md"), "/ko/a.md");
  }

  #[test]
  fn generate_default_config_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kdocs.toml");

    Config::generate_default_config("toml", &path, false).unwrap();
    assert_eq!(Config::from_file(&path).unwrap(), Config::default());

    let err = Config::generate_default_config("toml", &path, false).unwrap_err();
    assert!(err.to_string().contains("--force"));
    Config::generate_default_config("json", &path, true).unwrap();
  }
}
