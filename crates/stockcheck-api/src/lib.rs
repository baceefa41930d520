//! JSON REST API for Stockcheck.
//!
//! Exposes an axum [`Router`] backed by any [`stockcheck_core::store::StockLog`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/api/items` | [`items::list`] |
//! | `GET`  | `/api/observations` | [`observations::list`] |
//! | `POST` | `/api/observations` | [`observations::create`] |
//! | `GET`  | `/api/alerts/expiry` | [`alerts::expiry`] |
//! | `GET`  | `/api/alerts/low-stock` | [`alerts::low_stock`] |
//! | `GET`  | `/health` | [`health::handler`] |

pub mod alerts;
pub mod error;
pub mod health;
pub mod items;
pub mod observations;

use std::sync::Arc;

use axum::{Router, routing::get};
use stockcheck_core::store::StockLog;

pub use error::ApiError;

// ─── State ────────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// `store` is `None` when the server was started without a store path; every
/// data endpoint then fails with [`ApiError::NotConfigured`] and the health
/// probe reports `misconfigured`.
pub struct ApiState<S> {
  store: Option<Arc<S>>,
}

impl<S> ApiState<S> {
  pub fn new(store: Option<Arc<S>>) -> Self { Self { store } }

  /// The configured store, or [`ApiError::NotConfigured`].
  pub fn store(&self) -> Result<&S, ApiError> {
    self.store.as_deref().ok_or(ApiError::NotConfigured)
  }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full router: data endpoints under `/api` plus `/health`.
///
/// The returned `Router<()>` can be nested or layered by the caller.
pub fn router<S>(store: Option<Arc<S>>) -> Router<()>
where
  S: StockLog + 'static,
{
  let state = ApiState::new(store);

  let api = Router::new()
    .route("/items", get(items::list::<S>))
    .route(
      "/observations",
      get(observations::list::<S>).post(observations::create::<S>),
    )
    .route("/alerts/expiry", get(alerts::expiry::<S>))
    .route("/alerts/low-stock", get(alerts::low_stock::<S>));

  Router::new()
    .nest("/api", api)
    .route("/health", get(health::handler::<S>))
    .with_state(state)
}

/// Read a required, non-blank `store` query parameter.
pub(crate) fn required_store(store: Option<String>) -> Result<String, ApiError> {
  store
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .ok_or_else(|| ApiError::Validation("missing required query parameter: store".into()))
}
