//! Error types for `stockcheck-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// One or more required submission fields were absent or blank. Holds the
  /// field names in declaration order.
  #[error("missing required field(s): {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("invalid item_id {0:?}: expected a UUID")]
  InvalidItemId(String),

  #[error("invalid quantity {0:?}: expected a non-negative whole number")]
  InvalidQuantity(String),

  #[error("invalid expiry {0:?}: expected a date such as 2024-05-01")]
  InvalidExpiry(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
