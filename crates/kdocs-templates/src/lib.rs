use std::collections::HashMap;

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const HOME_TEMPLATE: &str = include_str!("../templates/home.html");
pub const NOT_FOUND_TEMPLATE: &str =
  include_str!("../templates/not_found.html");
pub const NAVIGATION_TEMPLATE: &str =
  include_str!("../templates/navigation.html");

pub const DEFAULT_CSS: &str = include_str!("../templates/style.css");

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("page.html", PAGE_TEMPLATE);
  templates.insert("home.html", HOME_TEMPLATE);
  templates.insert("not_found.html", NOT_FOUND_TEMPLATE);
  templates.insert("navigation.html", NAVIGATION_TEMPLATE);
  templates.insert("style.css", DEFAULT_CSS);
  templates
}
