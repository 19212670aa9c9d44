use serde::{Deserialize, Serialize};

/// Page metadata shared by every generated page.
///
/// Rendered as `<meta>` tags for `OpenGraph` and Twitter cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
  /// Value of the `description` meta tag.
  pub description: String,

  /// Preview image for link cards.
  pub image: Option<String>,

  /// `og:locale`.
  pub locale: String,

  /// `og:site_name`.
  pub site_name: String,

  /// `twitter:site`.
  pub twitter_site: Option<String>,

  /// `twitter:creator`.
  pub twitter_creator: Option<String>,

  /// Browser theme color.
  pub theme_color: String,

  /// Favicon URL.
  pub favicon: String,
}

impl Default for MetaConfig {
  fn default() -> Self {
    Self {
      description:     "Kotlin 문서 비공식 번역".to_string(),
      image:           Some(
        "https://kotlinlang.org/assets/images/open-graph/docs.png".to_string(),
      ),
      locale:          "ko_KR".to_string(),
      site_name:       "Kotlin Help".to_string(),
      twitter_site:    Some("@kotlin".to_string()),
      twitter_creator: Some("@kotlin".to_string()),
      theme_color:     "#19191C".to_string(),
      favicon:         "/favicon.svg".to_string(),
    }
  }
}
