//! Layering of configuration sources.
//!
//! Every source is turned into a JSON value tree first: the defaults, each
//! config file in order, then `KEY=VALUE` overrides. Only keys a source
//! actually sets replace earlier values, so a later file never resets a
//! field to its default just by omitting it.
use serde_json::Value;

use crate::error::ConfigError;

/// Optional fields that hold numbers; an override for them is parsed as one.
const OPTIONAL_NUMERIC_KEYS: &[&str] = &["jobs"];

/// Merge `other` into `base`. Tables are merged key by key, every other
/// value replaces what was there.
pub fn merge_values(base: &mut Value, other: Value) {
  match (base, other) {
    (Value::Object(base), Value::Object(other)) => {
      for (key, value) in other {
        match base.get_mut(&key) {
          Some(existing) => merge_values(existing, value),
          None => {
            base.insert(key, value);
          },
        }
      }
    },
    (base, other) => *base = other,
  }
}

/// Apply one dotted `key` override, e.g. `meta.locale=en_US`.
///
/// The value is parsed according to the type of the value it replaces; an
/// empty value clears optional fields.
///
/// # Errors
///
/// Returns an error for unknown keys, for keys naming a whole section and
/// for values that do not parse as the expected type.
pub fn apply_override(
  root: &mut Value,
  key: &str,
  value: &str,
) -> Result<(), ConfigError> {
  let unknown =
    || ConfigError::UnknownKey(key.to_string());

  let mut segments = key.split('.').peekable();
  let mut current = root;
  let slot = loop {
    let Some(segment) = segments.next() else {
      return Err(unknown());
    };
    let Some(object) = current.as_object_mut() else {
      return Err(unknown());
    };
    let Some(next) = object.get_mut(segment) else {
      return Err(unknown());
    };
    if segments.peek().is_none() {
      break next;
    }
    current = next;
  };

  *slot = match &*slot {
    Value::Bool(_) => Value::Bool(parse_boolean(key, value)?),
    Value::Number(_) => parse_number(key, value)?,
    Value::String(_) => Value::String(value.to_string()),
    Value::Null if value.is_empty() => Value::Null,
    Value::Null if OPTIONAL_NUMERIC_KEYS.contains(&key) => {
      parse_number(key, value)?
    },
    Value::Null => Value::String(value.to_string()),
    Value::Object(_) | Value::Array(_) => {
      return Err(ConfigError::Invalid(format!(
        "Configuration key '{key}' is a section and cannot be set directly"
      )));
    },
  };

  Ok(())
}

/// Parse a boolean the way command line users write them.
///
/// # Errors
///
/// Returns an error if `value` is not a recognized boolean.
pub fn parse_boolean(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "on" | "1" => Ok(true),
    "false" | "no" | "off" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Invalid(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, on/off or 1/0"
      )))
    },
  }
}

fn parse_number(key: &str, value: &str) -> Result<Value, ConfigError> {
  value.parse::<u64>().map(Value::from).map_err(|_| {
    ConfigError::Invalid(format!(
      "Invalid numeric value for '{key}': '{value}'"
    ))
  })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use serde_json::json;

  use super::*;

  #[test]
  fn merge_replaces_leaves_and_keeps_siblings() {
    let mut base = json!({"a": 1, "meta": {"locale": "ko_KR", "image": "x"}});
    merge_values(&mut base, json!({"meta": {"locale": "en_US"}, "b": true}));
    assert_eq!(
      base,
      json!({"a": 1, "b": true, "meta": {"locale": "en_US", "image": "x"}})
    );
  }

  #[test]
  fn overrides_follow_existing_types() {
    let mut root = json!({
      "source_control": true,
      "toc_depth": 3,
      "site_title": "Kotlin 문서",
      "jobs": null,
      "template_dir": null,
      "meta": {"image": "x"}
    });

    apply_override(&mut root, "source_control", "no").unwrap();
    apply_override(&mut root, "toc_depth", "2").unwrap();
    apply_override(&mut root, "site_title", "Docs").unwrap();
    apply_override(&mut root, "jobs", "4").unwrap();
    apply_override(&mut root, "template_dir", "templates").unwrap();
    apply_override(&mut root, "meta.image", "").unwrap();

    assert_eq!(
      root,
      json!({
        "source_control": false,
        "toc_depth": 2,
        "site_title": "Docs",
        "jobs": 4,
        "template_dir": "templates",
        "meta": {"image": ""}
      })
    );
  }

  #[test]
  fn rejects_bad_overrides() {
    let mut root = json!({"toc_depth": 3, "flag": false, "meta": {}});

    let unknown = apply_override(&mut root, "nope", "1").unwrap_err();
    assert!(unknown.to_string().contains("Unknown configuration key"));

    let nested = apply_override(&mut root, "toc_depth.x", "1").unwrap_err();
    assert!(nested.to_string().contains("Unknown configuration key"));

    let number = apply_override(&mut root, "toc_depth", "deep").unwrap_err();
    assert!(number.to_string().contains("Invalid numeric value"));

    let boolean = apply_override(&mut root, "flag", "maybe").unwrap_err();
    assert!(boolean.to_string().contains("Invalid boolean value"));

    let section = apply_override(&mut root, "meta", "x").unwrap_err();
    assert!(section.to_string().contains("is a section"));
  }
}
