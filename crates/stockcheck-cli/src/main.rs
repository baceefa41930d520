//! `stockcheck`: staff command-line client for the stockcheck server.
//!
//! # Usage
//!
//! ```
//! stockcheck session start --store Downtown --shift AM --staff Sam
//! stockcheck items
//! stockcheck log 6f1c9f4e-8d1b-4a51-9a0e-2b7c3d4e5f60 --quantity 3 --expiry 2024-05-02
//! stockcheck alerts
//! ```

mod client;
mod render;
mod session_file;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use session_file::Loaded;
use stockcheck_core::{alerts, observation::QuantityInput, session::SessionContext};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stockcheck", about = "Staff client for the stockcheck server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the stockcheck server (default: http://localhost:8080).
  #[arg(long, env = "STOCKCHECK_URL")]
  url: Option<String>,

  /// Where the current session is kept.
  #[arg(long, env = "STOCKCHECK_SESSION", value_name = "FILE")]
  session_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Start, show or end the current staff session.
  #[command(subcommand)]
  Session(SessionCommand),
  /// List the item catalog.
  Items,
  /// Log a stock check for an item under the current session.
  Log {
    item_id:  String,
    /// Count on the shelf; leave out if not counted.
    #[arg(long)]
    quantity: Option<String>,
    /// Expiry date, e.g. 2024-05-02.
    #[arg(long)]
    expiry:   String,
  },
  /// Show expiry alerts and low stock among expiring items.
  Alerts {
    /// Store to check instead of the session's.
    #[arg(long)]
    store: Option<String>,
  },
  /// Show items whose latest count is zero.
  OutOfStock {
    #[arg(long)]
    store: Option<String>,
  },
  /// Ask the server whether it is ready.
  Health,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
  Start {
    #[arg(long)]
    store: String,
    #[arg(long)]
    shift: String,
    #[arg(long)]
    staff: String,
  },
  Show,
  End,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
  };
  let session_path = args.session_file.unwrap_or_else(session_file::default_path);

  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Session(cmd) => run_session(cmd, &session_path),
    Command::Items => {
      print!("{}", render::items(&client.list_items().await?));
      Ok(())
    }
    Command::Log { item_id, quantity, expiry } => {
      let session = require_session(&session_path)?;
      let draft = session.draft(item_id, quantity.map(QuantityInput::Text), expiry);
      let obs = client.submit(&draft).await?;
      println!(
        "Logged {} at {} ({}): qty {}, expiry {}",
        obs.item_name.as_deref().unwrap_or(alerts::FALLBACK_ITEM_NAME),
        obs.store,
        obs.shift,
        obs.quantity.map_or_else(|| "not recorded".to_string(), |q| q.to_string()),
        obs.expiry,
      );
      Ok(())
    }
    Command::Alerts { store } => {
      let store = resolve_store(store, &session_path)?;
      let expiring = client
        .expiry_alerts(&store)
        .await
        .context("alerts unavailable")?;
      print!("{}", render::expiry_alerts(&expiring, Utc::now()));
      println!();
      print!("{}", render::low_stock_in_window(&alerts::low_stock_in_window(&expiring)));
      Ok(())
    }
    Command::OutOfStock { store } => {
      let store = resolve_store(store, &session_path)?;
      let zero = client
        .zero_stock_alerts(&store)
        .await
        .context("out-of-stock list unavailable")?;
      print!("{}", render::zero_stock(&zero));
      Ok(())
    }
    Command::Health => {
      let status = client.health().await?;
      println!("{status}");
      if status != "ok" {
        bail!("server is not ready: {status}");
      }
      Ok(())
    }
  }
}

// ─── Session helpers ──────────────────────────────────────────────────────────

fn run_session(cmd: SessionCommand, path: &std::path::Path) -> Result<()> {
  match cmd {
    SessionCommand::Start { store, shift, staff } => {
      let session = SessionContext::start(store, shift, staff, Local::now().date_naive())?;
      session_file::save(path, &session)?;
      println!(
        "Session started: {} / {} / {} (until midnight)",
        session.store, session.shift, session.staff
      );
    }
    SessionCommand::Show => match session_file::load(path, Local::now().naive_local())? {
      Loaded::Active(s) => println!(
        "{} / {} / {} (started {}, ends {})",
        s.store,
        s.shift,
        s.staff,
        s.started_on,
        s.expires_at()
      ),
      Loaded::Expired(s) => println!("Session from {} has expired.", s.started_on),
      Loaded::None => println!("No active session."),
    },
    SessionCommand::End => {
      session_file::clear(path)?;
      println!("Session ended.");
    }
  }
  Ok(())
}

fn require_session(path: &std::path::Path) -> Result<SessionContext> {
  match session_file::load(path, Local::now().naive_local())? {
    Loaded::Active(s) => Ok(s),
    Loaded::Expired(s) => bail!(
      "session from {} expired at midnight; run `stockcheck session start`",
      s.started_on
    ),
    Loaded::None => bail!("no active session; run `stockcheck session start`"),
  }
}

fn resolve_store(explicit: Option<String>, session_path: &std::path::Path) -> Result<String> {
  match explicit {
    Some(store) => Ok(store),
    None => Ok(require_session(session_path)?.store),
  }
}
