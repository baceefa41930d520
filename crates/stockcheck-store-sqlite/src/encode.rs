//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond fraction
//! and a `Z` suffix, so lexical order in SQL matches chronological order.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use stockcheck_core::{item::Item, observation::Observation};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Quantity ────────────────────────────────────────────────────────────────

pub fn encode_quantity(q: Option<u32>) -> Option<i64> { q.map(i64::from) }

pub fn decode_quantity(q: Option<i64>) -> Result<Option<u32>> {
  q.map(|n| u32::try_from(n).map_err(|_| Error::Quantity(n)))
    .transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawObservation::from_row`].
pub const OBSERVATION_COLUMNS: &str = "observation_id, item_id, item_name, \
  category, sub_category, store, shift, staff, quantity, expiry, created_at";

/// Raw values read directly from an `observations` row.
pub struct RawObservation {
  pub observation_id: String,
  pub item_id:        Option<String>,
  pub item_name:      Option<String>,
  pub category:       Option<String>,
  pub sub_category:   Option<String>,
  pub store:          String,
  pub shift:          String,
  pub staff:          String,
  pub quantity:       Option<i64>,
  pub expiry:         String,
  pub created_at:     String,
}

impl RawObservation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      observation_id: row.get(0)?,
      item_id:        row.get(1)?,
      item_name:      row.get(2)?,
      category:       row.get(3)?,
      sub_category:   row.get(4)?,
      store:          row.get(5)?,
      shift:          row.get(6)?,
      staff:          row.get(7)?,
      quantity:       row.get(8)?,
      expiry:         row.get(9)?,
      created_at:     row.get(10)?,
    })
  }

  pub fn into_observation(self) -> Result<Observation> {
    Ok(Observation {
      observation_id: decode_uuid(&self.observation_id)?,
      item_id:        self.item_id.as_deref().map(decode_uuid).transpose()?,
      item_name:      self.item_name,
      category:       self.category,
      sub_category:   self.sub_category,
      store:          self.store,
      shift:          self.shift,
      staff:          self.staff,
      quantity:       decode_quantity(self.quantity)?,
      expiry:         self.expiry,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`RawItem::from_row`].
pub const ITEM_COLUMNS: &str = "item_id, name, category, sub_category, shelf_life_days";

/// Raw values read directly from an `items` row.
pub struct RawItem {
  pub item_id:         String,
  pub name:            String,
  pub category:        String,
  pub sub_category:    Option<String>,
  pub shelf_life_days: u32,
}

impl RawItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      item_id:         row.get(0)?,
      name:            row.get(1)?,
      category:        row.get(2)?,
      sub_category:    row.get(3)?,
      shelf_life_days: row.get(4)?,
    })
  }

  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      item_id:         decode_uuid(&self.item_id)?,
      name:            self.name,
      category:        self.category,
      sub_category:    self.sub_category,
      shelf_life_days: self.shelf_life_days,
    })
  }
}
