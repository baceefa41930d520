//! The `StockLog` trait: the persistence seam for observations and the
//! item catalog.
//!
//! The trait is implemented by storage backends (e.g.
//! `stockcheck-store-sqlite`). The HTTP layer depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  item::{Item, NewItem},
  observation::{NewObservation, Observation},
};

/// How many of a store's most recent observations an alert computation
/// reads. Older history does not contribute to current state.
pub const RECENT_OBSERVATION_LIMIT: usize = 2000;

/// Abstraction over a stock log backend.
///
/// Observation writes are append-only; there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StockLog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Cheap round-trip used by the health probe.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Insert a catalog item. Used by operator import, not by staff.
  fn add_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Retrieve a catalog item by id. Returns `None` if not found.
  fn get_item(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  /// All catalog items in [`Item::catalog_order`].
  fn list_items(
    &self,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  // ── Observations ──────────────────────────────────────────────────────

  /// Append an observation and return the persisted row. `observation_id`
  /// and `created_at` are set by the store.
  fn record_observation(
    &self,
    input: NewObservation,
  ) -> impl Future<Output = Result<Observation, Self::Error>> + Send + '_;

  /// The most recent `limit` observations for `store`, ordered by
  /// `created_at` descending. Rows sharing a timestamp are returned in
  /// reverse insertion order.
  fn recent_observations<'a>(
    &'a self,
    store: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Observation>, Self::Error>> + Send + 'a;
}
