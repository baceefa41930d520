//! Liveness probe.
//!
//! | Status | Body | Meaning |
//! |--------|------|---------|
//! | 200 | `{"status":"ok"}` | store configured and answering |
//! | 503 | `{"status":"misconfigured"}` | started without a store |
//! | 500 | `{"status":"error","error":"..."}` | store configured but failing |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use stockcheck_core::store::StockLog;

use crate::ApiState;

/// `GET /health`
pub async fn handler<S>(State(state): State<ApiState<S>>) -> impl IntoResponse
where
  S: StockLog,
{
  let Ok(store) = state.store() else {
    return (
      StatusCode::SERVICE_UNAVAILABLE,
      Json(json!({ "status": "misconfigured" })),
    );
  };

  match store.ping().await {
    Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
    Err(e) => {
      tracing::warn!(error = %e, "health check ping failed");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "error": e.to_string() })),
      )
    }
  }
}
