//! Handler for `GET /items`: the read-only item catalog.

use axum::{Json, extract::State};
use stockcheck_core::{item::Item, store::StockLog};

use crate::{ApiState, error::ApiError};

/// `GET /items`: every catalog item ordered by category, sub-category, name.
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<Item>>, ApiError>
where
  S: StockLog,
{
  let items = state
    .store()?
    .list_items()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}
