//! Item: an entry in the product catalog.
//!
//! The catalog is read-only from the point of view of the stock log; staff
//! never edit it. Observations reference items by `item_id` and carry a
//! snapshot of the name and category at submission time.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub item_id:         Uuid,
  pub name:            String,
  pub category:        String,
  pub sub_category:    Option<String>,
  /// Upper bound, in days, for the expiry a client should offer when logging
  /// this item. Not used by alert derivation.
  #[serde(default)]
  pub shelf_life_days: u32,
}

impl Item {
  /// Catalog display order: category, then sub-category, then name.
  ///
  /// A missing sub-category sorts before any present one.
  pub fn catalog_order(a: &Item, b: &Item) -> Ordering {
    a.category
      .cmp(&b.category)
      .then_with(|| a.sub_category.cmp(&b.sub_category))
      .then_with(|| a.name.cmp(&b.name))
  }
}

/// Input to [`crate::store::StockLog::add_item`]. Used by catalog import.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
  /// Caller-supplied id; a fresh v4 id is assigned when absent.
  pub item_id:         Option<Uuid>,
  pub name:            String,
  pub category:        String,
  pub sub_category:    Option<String>,
  #[serde(default)]
  pub shelf_life_days: u32,
}
