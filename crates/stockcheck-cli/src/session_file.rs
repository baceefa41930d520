//! On-disk persistence for the staff [`SessionContext`].
//!
//! The session lives in a small TOML file so that consecutive invocations
//! share it. An expired session is removed on load.

use std::{
  io,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use stockcheck_core::session::SessionContext;

/// Default location: `$HOME/.config/stockcheck/session.toml`, falling back to
/// the working directory when `HOME` is unset.
pub fn default_path() -> PathBuf {
  match std::env::var_os("HOME") {
    Some(home) => PathBuf::from(home).join(".config/stockcheck/session.toml"),
    None => PathBuf::from(".stockcheck-session.toml"),
  }
}

/// Result of [`load`].
#[derive(Debug, PartialEq, Eq)]
pub enum Loaded {
  Active(SessionContext),
  /// A session existed but lapsed at midnight; the file has been removed.
  Expired(SessionContext),
  None,
}

pub fn load(path: &Path, now: NaiveDateTime) -> Result<Loaded> {
  let raw = match std::fs::read_to_string(path) {
    Ok(raw) => raw,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Loaded::None),
    Err(e) => return Err(e).with_context(|| format!("reading session file {}", path.display())),
  };
  let session: SessionContext = toml::from_str(&raw)
    .with_context(|| format!("parsing session file {}", path.display()))?;

  if session.is_expired(now) {
    clear(path)?;
    tracing::debug!(started_on = %session.started_on, "discarded expired session");
    return Ok(Loaded::Expired(session));
  }
  Ok(Loaded::Active(session))
}

pub fn save(path: &Path, session: &SessionContext) -> Result<()> {
  if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("creating session directory {}", dir.display()))?;
  }
  let raw = toml::to_string(session).context("serialising session")?;
  std::fs::write(path, raw).with_context(|| format!("writing session file {}", path.display()))
}

/// Remove the session file. A missing file is not an error.
pub fn clear(path: &Path) -> Result<()> {
  match std::fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e).with_context(|| format!("removing session file {}", path.display())),
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir()
      .join(format!("stockcheck-test-{}", uuid::Uuid::new_v4()))
      .join(name)
  }

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, d).unwrap() }

  #[test]
  fn save_then_load_same_day() {
    let path = scratch("session.toml");
    let session = SessionContext::start("Downtown", "AM", "Sam", day(1)).unwrap();
    save(&path, &session).unwrap();

    let noon = day(1).and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(load(&path, noon).unwrap(), Loaded::Active(session));
  }

  #[test]
  fn next_day_load_expires_and_removes_file() {
    let path = scratch("session.toml");
    let session = SessionContext::start("Downtown", "AM", "Sam", day(1)).unwrap();
    save(&path, &session).unwrap();

    let next_morning = day(2).and_hms_opt(7, 0, 0).unwrap();
    assert_eq!(load(&path, next_morning).unwrap(), Loaded::Expired(session));
    assert!(!path.exists());
    assert_eq!(load(&path, next_morning).unwrap(), Loaded::None);
  }

  #[test]
  fn clearing_a_missing_file_is_fine() {
    clear(&scratch("absent.toml")).unwrap();
  }
}
