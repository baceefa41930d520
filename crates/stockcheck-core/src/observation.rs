//! Observation types: the fundamental unit of the stock log.
//!
//! An observation is one staff stock check: who looked, where, when, how many
//! were on the shelf and what the expiry date was. Observations are never
//! updated or deleted; the current state of an item is always derived from
//! the most recent observation for it (see [`crate::reduce`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Expiry parsing ──────────────────────────────────────────────────────────

/// Interpret a stored expiry value as an instant.
///
/// A bare calendar date (`2024-05-01`) is taken as midnight UTC at the start
/// of that day. A full RFC 3339 timestamp is also accepted. Anything else
/// yields `None`.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
  }
  DateTime::parse_from_rfc3339(raw)
    .ok()
    .map(|dt| dt.with_timezone(&Utc))
}

// ─── Observation ─────────────────────────────────────────────────────────────

/// A stored stock check. Once written, no field is ever updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
  pub observation_id: Uuid,
  /// `None` only for rows imported without a catalog reference; such rows
  /// never contribute to current state.
  pub item_id:        Option<Uuid>,
  pub item_name:      Option<String>,
  pub category:       Option<String>,
  pub sub_category:   Option<String>,
  pub store:          String,
  pub shift:          String,
  pub staff:          String,
  /// `None` means the quantity was not recorded, which is distinct from 0.
  pub quantity:       Option<u32>,
  /// The expiry exactly as submitted. Parsed on read with [`parse_expiry`].
  pub expiry:         String,
  /// Server-assigned timestamp; the ordering key for "most recent".
  pub created_at:     DateTime<Utc>,
}

impl Observation {
  /// The expiry as an instant, or `None` if the stored text does not parse.
  pub fn expires_at(&self) -> Option<DateTime<Utc>> { parse_expiry(&self.expiry) }
}

// ─── NewObservation ──────────────────────────────────────────────────────────

/// Validated input to [`crate::store::StockLog::record_observation`].
/// `observation_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewObservation {
  pub item_id:      Uuid,
  pub item_name:    Option<String>,
  pub category:     Option<String>,
  pub sub_category: Option<String>,
  pub store:        String,
  pub shift:        String,
  pub staff:        String,
  pub quantity:     Option<u32>,
  pub expiry:       String,
}

// ─── Draft (unvalidated submission) ──────────────────────────────────────────

/// A quantity as it arrives from a form: a JSON number or the raw text of an
/// input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
  Whole(i64),
  Fractional(f64),
  Text(String),
}

impl QuantityInput {
  /// Normalise to a recorded quantity. Blank text means "not recorded".
  pub fn resolve(&self) -> Result<Option<u32>> {
    match self {
      Self::Whole(n) => u32::try_from(*n)
        .map(Some)
        .map_err(|_| Error::InvalidQuantity(n.to_string())),
      Self::Fractional(f) => {
        if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) {
          Ok(Some(*f as u32))
        } else {
          Err(Error::InvalidQuantity(f.to_string()))
        }
      }
      Self::Text(s) => {
        let s = s.trim();
        if s.is_empty() {
          return Ok(None);
        }
        s.parse::<u32>()
          .map(Some)
          .map_err(|_| Error::InvalidQuantity(s.to_owned()))
      }
    }
  }
}

/// A stock-check submission before validation. Every field is optional so
/// that missing fields can be reported together rather than one at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationDraft {
  #[serde(default)]
  pub item_id:      Option<String>,
  #[serde(default)]
  pub store:        Option<String>,
  #[serde(default)]
  pub shift:        Option<String>,
  #[serde(default)]
  pub staff:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quantity:     Option<QuantityInput>,
  #[serde(default)]
  pub expiry:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub item_name:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sub_category: Option<String>,
}

fn present(field: &Option<String>) -> Option<String> {
  field
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

impl ObservationDraft {
  /// Check required fields, parse the item id, quantity and expiry.
  ///
  /// All missing required fields are reported in a single
  /// [`Error::MissingFields`].
  pub fn validate(self) -> Result<NewObservation> {
    let item_id = present(&self.item_id);
    let store = present(&self.store);
    let shift = present(&self.shift);
    let staff = present(&self.staff);
    let expiry = present(&self.expiry);

    let missing: Vec<&'static str> = [
      ("item_id", item_id.is_none()),
      ("store", store.is_none()),
      ("shift", shift.is_none()),
      ("staff", staff.is_none()),
      ("expiry", expiry.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    let (Some(item_id), Some(store), Some(shift), Some(staff), Some(expiry)) =
      (item_id, store, shift, staff, expiry)
    else {
      return Err(Error::MissingFields(missing));
    };

    let item_id =
      Uuid::parse_str(&item_id).map_err(|_| Error::InvalidItemId(item_id.clone()))?;
    let quantity = self
      .quantity
      .as_ref()
      .map(QuantityInput::resolve)
      .transpose()?
      .flatten();
    if parse_expiry(&expiry).is_none() {
      return Err(Error::InvalidExpiry(expiry));
    }

    Ok(NewObservation {
      item_id,
      item_name: present(&self.item_name),
      category: present(&self.category),
      sub_category: present(&self.sub_category),
      store,
      shift,
      staff,
      quantity,
      expiry,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn draft() -> ObservationDraft {
    ObservationDraft {
      item_id: Some(Uuid::new_v4().to_string()),
      store: Some("Downtown".into()),
      shift: Some("AM".into()),
      staff: Some("Sam".into()),
      quantity: None,
      expiry: Some("2024-05-01".into()),
      ..Default::default()
    }
  }

  #[test]
  fn parse_expiry_accepts_dates_and_timestamps() {
    assert_eq!(
      parse_expiry("2024-05-01"),
      Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(
      parse_expiry("2024-05-01T12:30:00+02:00"),
      Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap())
    );
    assert_eq!(parse_expiry("next tuesday"), None);
    assert_eq!(parse_expiry(""), None);
  }

  #[test]
  fn zero_quantity_is_distinct_from_blank() {
    let mut zero = draft();
    zero.quantity = Some(QuantityInput::Whole(0));
    assert_eq!(zero.validate().unwrap().quantity, Some(0));

    let mut blank = draft();
    blank.quantity = Some(QuantityInput::Text("  ".into()));
    assert_eq!(blank.validate().unwrap().quantity, None);

    assert_eq!(draft().validate().unwrap().quantity, None);
  }

  #[test]
  fn quantity_from_text_and_json() {
    let from_json: ObservationDraft = serde_json::from_value(serde_json::json!({
      "item_id": Uuid::new_v4(),
      "store": "Downtown", "shift": "PM", "staff": "Ana",
      "quantity": "4", "expiry": "2024-05-01"
    }))
    .unwrap();
    assert_eq!(from_json.validate().unwrap().quantity, Some(4));

    assert_eq!(QuantityInput::Fractional(3.0).resolve().unwrap(), Some(3));
    assert!(QuantityInput::Fractional(1.5).resolve().is_err());
    assert!(QuantityInput::Whole(-1).resolve().is_err());
    assert!(QuantityInput::Text("lots".into()).resolve().is_err());
  }

  #[test]
  fn missing_fields_are_all_named() {
    let input = ObservationDraft {
      item_id: Some(Uuid::new_v4().to_string()),
      shift: Some("AM".into()),
      staff: Some("   ".into()),
      ..Default::default()
    };
    match input.validate() {
      Err(Error::MissingFields(fields)) => {
        assert_eq!(fields, vec!["store", "staff", "expiry"]);
      }
      other => panic!("expected MissingFields, got {other:?}"),
    }
  }

  #[test]
  fn unparsable_expiry_is_rejected_at_submission() {
    let mut input = draft();
    input.expiry = Some("31/02/2024".into());
    assert!(matches!(input.validate(), Err(Error::InvalidExpiry(_))));
  }

  #[test]
  fn malformed_item_id_is_rejected() {
    let mut input = draft();
    input.item_id = Some("not-a-uuid".into());
    assert!(matches!(input.validate(), Err(Error::InvalidItemId(_))));
  }
}
