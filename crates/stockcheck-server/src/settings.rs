//! Server configuration.
//!
//! Layered from an optional TOML file and `STOCKCHECK_*` environment
//! variables (environment wins). A missing `store_path` is not a startup
//! error: the server still comes up so the health probe can report it.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite file backing the stock log. `~/` is expanded.
  #[serde(default)]
  pub store_path: Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

impl ServerConfig {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("STOCKCHECK"));
    Self::build(builder)
  }

  /// Parse a TOML document with no environment overlay.
  pub fn from_toml(source: &str) -> anyhow::Result<Self> {
    Self::build(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
