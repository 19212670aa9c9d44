//! List spacing markers.
//!
//! `{*large-spacing}` and `{*compact}` put a marker element before the list
//! that follows them; the stylesheet adjusts that list's item spacing.

/// Marker names that are recognized, in the form `{*name}`.
pub const SPACING_MARKERS: [&str; 2] = ["large-spacing", "compact"];

/// Replace each spacing marker with an empty `<div>` carrying its name.
#[must_use]
pub fn expand_list_spacing(markdown: &str) -> String {
  SPACING_MARKERS
    .iter()
    .fold(markdown.to_string(), |markdown, name| {
      markdown.replace(
        &format!("{{*{name}}}"),
        &format!("<div class=\"{name}\"></div>\n"),
      )
    })
}
