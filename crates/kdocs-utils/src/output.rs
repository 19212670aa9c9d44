use std::{
  fs,
  path::{Component, Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};

/// Output file of a document page: `{output_dir}/docs/{key}/index.html`.
///
/// Keys keep their `.md` suffix so that `/docs/basic-syntax.md` resolves on
/// any static file server. Keys that would leave the output directory yield
/// `None`.
#[must_use]
pub fn page_output_path(output_dir: &Path, key: &str) -> Option<PathBuf> {
  let relative = Path::new(key);
  if key.is_empty()
    || !relative
      .components()
      .all(|component| matches!(component, Component::Normal(_)))
  {
    return None;
  }
  Some(output_dir.join("docs").join(relative).join("index.html"))
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }
  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn pages_live_under_docs() {
    assert_eq!(
      page_output_path(Path::new("build"), "basic-syntax.md"),
      Some(PathBuf::from("build/docs/basic-syntax.md/index.html"))
    );
    assert_eq!(
      page_output_path(Path::new("build"), "home"),
      Some(PathBuf::from("build/docs/home/index.html"))
    );
  }

  #[test]
  fn keys_cannot_escape_the_output_directory() {
    for key in ["", "../a.md", "/etc/a.md", "a/../../b.md"] {
      assert_eq!(page_output_path(Path::new("build"), key), None, "{key}");
    }
  }

  #[test]
  fn write_output_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = page_output_path(dir.path(), "a.md").unwrap();
    write_output(&path, "<p>a</p>").unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "<p>a</p>");
  }
}
