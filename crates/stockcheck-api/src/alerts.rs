//! Handlers for `/alerts` endpoints.
//!
//! Both endpoints read the store's recent log, reduce it to the current
//! observation per item and derive alerts in memory. A store failure is
//! reported as an error, never as an empty list.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;
use serde::Deserialize;
use stockcheck_core::{
  alerts::{self, ExpiryAlert, ZeroStockAlert},
  reduce::{CurrentStock, load_current_stock},
  store::StockLog,
};

use crate::{ApiState, error::ApiError, required_store};

#[derive(Debug, Deserialize)]
pub struct AlertParams {
  pub store: Option<String>,
}

async fn current_stock<S>(
  state: &ApiState<S>,
  params: Result<Query<AlertParams>, QueryRejection>,
) -> Result<CurrentStock, ApiError>
where
  S: StockLog,
{
  let log = state.store()?;
  let Query(params) = params?;
  let store = required_store(params.store)?;
  let current = load_current_stock(log, &store)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::debug!(%store, items = current.len(), "current stock loaded");
  Ok(current)
}

/// `GET /alerts/expiry?store=<name>`: expired or expiring within 24 hours,
/// soonest first.
pub async fn expiry<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<AlertParams>, QueryRejection>,
) -> Result<Json<Vec<ExpiryAlert>>, ApiError>
where
  S: StockLog,
{
  let current = current_stock(&state, params).await?;
  Ok(Json(alerts::expiry_alerts(&current, Utc::now())))
}

/// `GET /alerts/low-stock?store=<name>`: items whose current quantity is
/// zero, most recently logged first.
pub async fn low_stock<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<AlertParams>, QueryRejection>,
) -> Result<Json<Vec<ZeroStockAlert>>, ApiError>
where
  S: StockLog,
{
  let current = current_stock(&state, params).await?;
  Ok(Json(alerts::zero_stock_alerts(&current)))
}
