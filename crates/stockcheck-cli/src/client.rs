//! Async HTTP client wrapping the stockcheck JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use stockcheck_core::{
  alerts::{ExpiryAlert, ZeroStockAlert},
  item::Item,
  observation::{Observation, ObservationDraft},
};

/// Connection settings for the stockcheck API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the stockcheck JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Decode a success body, or turn an error status into an error carrying
  /// the server's `{"error": ...}` message.
  async fn decode<T: DeserializeOwned>(what: &str, resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| status.to_string());
      return Err(anyhow!("{what} → {status}: {message}"));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {what}"))
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  /// `GET /api/items`
  pub async fn list_items(&self) -> Result<Vec<Item>> {
    let resp = self
      .client
      .get(self.url("/api/items"))
      .send()
      .await
      .context("GET /api/items failed")?;
    Self::decode("items", resp).await
  }

  // ── Observations ──────────────────────────────────────────────────────────

  /// `POST /api/observations`
  pub async fn submit(&self, draft: &ObservationDraft) -> Result<Observation> {
    let resp = self
      .client
      .post(self.url("/api/observations"))
      .json(draft)
      .send()
      .await
      .context("POST /api/observations failed")?;
    Self::decode("observation", resp).await
  }

  // ── Alerts ────────────────────────────────────────────────────────────────

  /// `GET /api/alerts/expiry?store=<store>`
  pub async fn expiry_alerts(&self, store: &str) -> Result<Vec<ExpiryAlert>> {
    let resp = self
      .client
      .get(self.url("/api/alerts/expiry"))
      .query(&[("store", store)])
      .send()
      .await
      .context("GET /api/alerts/expiry failed")?;
    Self::decode("expiry alerts", resp).await
  }

  /// `GET /api/alerts/low-stock?store=<store>`
  pub async fn zero_stock_alerts(&self, store: &str) -> Result<Vec<ZeroStockAlert>> {
    let resp = self
      .client
      .get(self.url("/api/alerts/low-stock"))
      .query(&[("store", store)])
      .send()
      .await
      .context("GET /api/alerts/low-stock failed")?;
    Self::decode("low-stock alerts", resp).await
  }

  // ── Health ────────────────────────────────────────────────────────────────

  /// `GET /health`: returns the reported status string whatever the HTTP
  /// status code.
  pub async fn health(&self) -> Result<String> {
    let resp = self
      .client
      .get(self.url("/health"))
      .send()
      .await
      .context("GET /health failed")?;
    let body: serde_json::Value = resp.json().await.context("deserialising health")?;
    Ok(
      body
        .get("status")
        .and_then(|s| s.as_str())
        .unwrap_or("unknown")
        .to_owned(),
    )
  }
}
