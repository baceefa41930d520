//! stockcheck-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite stock log, and serves the JSON API over HTTP.
//!
//! # Loading the catalog
//!
//! ```
//! cargo run -p stockcheck-server -- --import-items catalog.json
//! ```

mod import;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use stockcheck_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Stockcheck API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Import catalog items from a JSON file before serving.
  #[arg(long, value_name = "FILE")]
  import_items: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store = match &server_cfg.store_path {
    Some(path) => {
      let path = expand_tilde(path);
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(path = %path.display(), "stock log opened");
      Some(Arc::new(store))
    }
    None => {
      tracing::warn!("no store_path configured; data endpoints will return errors");
      None
    }
  };

  if let Some(catalog) = &cli.import_items {
    let store = store
      .as_deref()
      .context("--import-items requires store_path to be configured")?;
    let count = import::import_file(store, catalog).await?;
    tracing::info!(count, file = %catalog.display(), "catalog items imported");
  }

  let app = stockcheck_api::router(store).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
