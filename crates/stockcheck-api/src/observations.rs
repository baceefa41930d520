//! Handlers for `/observations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/observations` | `?store` required; optional `limit` (default 100, max 2000) |
//! | `POST` | `/observations` | Body: [`ObservationDraft`]; returns 201 + stored observation |

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stockcheck_core::{
  observation::{Observation, ObservationDraft},
  store::{RECENT_OBSERVATION_LIMIT, StockLog},
};

use crate::{ApiState, error::ApiError, required_store};

const DEFAULT_LIST_LIMIT: usize = 100;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub store: Option<String>,
  pub limit: Option<usize>,
}

/// `GET /observations?store=<name>[&limit=<n>]`: the raw log, newest first.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Observation>>, ApiError>
where
  S: StockLog,
{
  let log = state.store()?;
  let Query(params) = params?;
  let store = required_store(params.store)?;
  let limit = params
    .limit
    .unwrap_or(DEFAULT_LIST_LIMIT)
    .min(RECENT_OBSERVATION_LIMIT);

  let observations = log
    .recent_observations(&store, limit)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(observations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /observations`: validate, fill catalog snapshot fields, append.
///
/// Name and category snapshots omitted from the body are copied from the
/// catalog entry so that alerts can still label and filter the row if the
/// catalog later changes.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<ObservationDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StockLog,
{
  let log = state.store()?;
  let Json(draft) = body?;
  let mut input = draft.validate()?;

  let item = log
    .get_item(input.item_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::Validation(format!("item_id {} is not in the catalog", input.item_id))
    })?;

  input.item_name.get_or_insert(item.name);
  input.category.get_or_insert(item.category);
  if input.sub_category.is_none() {
    input.sub_category = item.sub_category;
  }

  let observation = log
    .record_observation(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    store = %observation.store,
    item_id = ?observation.item_id,
    quantity = ?observation.quantity,
    expiry = %observation.expiry,
    "observation recorded"
  );
  Ok((StatusCode::CREATED, Json(observation)))
}
