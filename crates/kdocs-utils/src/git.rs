//! Source control timestamps.
use std::{path::Path, process::Command};

use jiff::Timestamp;
use log::{debug, warn};

/// Commit time of the last commit that touched `path`.
///
/// Runs `git log -1 --pretty=format:%cI` from the file's directory. Any
/// failure (no git, untracked file, unparsable output) is logged and yields
/// `None`; callers omit the date in that case.
#[must_use]
pub fn last_commit_time(path: &Path) -> Option<Timestamp> {
  let file_name = path.file_name()?;
  let directory = path
    .parent()
    .filter(|parent| !parent.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  let output = match Command::new("git")
    .arg("-C")
    .arg(directory)
    .args(["log", "-1", "--pretty=format:%cI", "--"])
    .arg(file_name)
    .output()
  {
    Ok(output) => output,
    Err(e) => {
      warn!("Failed to run git for {}: {e}", path.display());
      return None;
    },
  };

  if !output.status.success() {
    debug!(
      "git log failed for {}: {}",
      path.display(),
      String::from_utf8_lossy(&output.stderr).trim()
    );
    return None;
  }

  parse_commit_time(&String::from_utf8_lossy(&output.stdout)).or_else(|| {
    debug!("No commit found for {}", path.display());
    None
  })
}

/// Parse the strict ISO 8601 date printed by `%cI`.
fn parse_commit_time(raw: &str) -> Option<Timestamp> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  match raw.parse::<Timestamp>() {
    Ok(timestamp) => Some(timestamp),
    Err(e) => {
      warn!("Unexpected git date '{raw}': {e}");
      None
    },
  }
}
