//! Panic-safe processing helpers.
use log::error;

/// Run `processor_fn` over `content`, returning `fallback` (or `content`
/// itself when `fallback` is empty) if it panics.
///
/// Used around the HTML post-processing step so a malformed DOM degrades to
/// the unprocessed comrak output instead of failing the whole build.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed) => processed,
    Err(e) => {
      if let Some(message) = e.downcast_ref::<String>() {
        error!("Error post-processing HTML: {message}");
      } else if let Some(message) = e.downcast_ref::<&str>() {
        error!("Error post-processing HTML: {message}");
      } else {
        error!("Unknown error occurred while post-processing HTML");
      }

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::panic, reason = "Exercises the recovery path")]

  use super::*;

  #[test]
  fn returns_processed_output() {
    assert_eq!(process_safe("a", |s| format!("<{s}>"), "x"), "<a>");
  }

  #[test]
  fn falls_back_on_panic() {
    assert_eq!(process_safe("a", |_| panic!("boom"), "fallback"), "fallback");
    assert_eq!(process_safe("raw", |_| panic!("boom"), ""), "raw");
  }

  #[test]
  fn empty_content_short_circuits() {
    assert_eq!(process_safe("", |_| "never".to_string(), "x"), "");
  }
}
