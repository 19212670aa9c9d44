use std::fmt;

/// Error type for default configuration templates.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration file in TOML, with a comment for every field.
pub const DEFAULT_TOML_TEMPLATE: &str = r##"# kdocs configuration file

# Directory containing the translated markdown documents
docs_dir = "docs"

# Navigation manifest
registry_path = "docs/registry.json"

# Documents that live outside the navigation tree (optional)
# exceptions_path = "docs/exceptions.json"

# Markdown file rendered on the site root (optional)
# readme_path = "README.md"

# Output directory for the generated site
output_dir = "build"

# Directory with template overrides (optional)
# template_dir = "templates"

# Directory copied verbatim into the output (optional)
# assets_dir = "public"

site_title = "Kotlin 문서"
site_url = "https://kdocs-kr.hoonkun.kiwi"

# Key of the documentation home page
home_key = "home"

# Prefix of local document links
local_link_prefix = "/docs/"

# Untranslated documents link here instead
fallback_base_url = "https://kotlinlang.org/docs"

# Links starting with this prefix are styled as API references
api_doc_prefix = "https://kotlinlang.org/"

# Deepest heading level in the table of contents (1-6)
toc_depth = 3

# Number of threads used for rendering (defaults to the number of CPU cores)
# jobs = 4

# Time zone for last-modified dates
time_zone = "Asia/Seoul"

# Read last-modified dates from git
source_control = true

# Edit link shown on translated pages (optional)
# edit_url = "https://github.com/hoonkun/kotlin-docs-kr/edit/main/docs/"

[meta]
description = "Kotlin 문서 비공식 번역"
image = "https://kotlinlang.org/assets/images/open-graph/docs.png"
locale = "ko_KR"
site_name = "Kotlin Help"
twitter_site = "@kotlin"
twitter_creator = "@kotlin"
theme_color = "#19191C"
favicon = "/favicon.svg"
"##;

/// Default configuration file in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r##"{
  "docs_dir": "docs",
  "registry_path": "docs/registry.json",
  "output_dir": "build",
  "site_title": "Kotlin 문서",
  "site_url": "https://kdocs-kr.hoonkun.kiwi",
  "home_key": "home",
  "local_link_prefix": "/docs/",
  "fallback_base_url": "https://kotlinlang.org/docs",
  "api_doc_prefix": "https://kotlinlang.org/",
  "toc_depth": 3,
  "time_zone": "Asia/Seoul",
  "source_control": true,
  "meta": {
    "description": "Kotlin 문서 비공식 번역",
    "image": "https://kotlinlang.org/assets/images/open-graph/docs.png",
    "locale": "ko_KR",
    "site_name": "Kotlin Help",
    "twitter_site": "@kotlin",
    "twitter_creator": "@kotlin",
    "theme_color": "#19191C",
    "favicon": "/favicon.svg"
  }
}
"##;

/// Get the default configuration template for `format`.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
