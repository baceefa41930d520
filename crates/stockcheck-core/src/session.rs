//! Staff session context.
//!
//! A session records which store, shift and staff member subsequent stock
//! checks belong to. It is a plain value passed to each call; nothing holds it
//! globally. Sessions lapse at the first local midnight after they start so a
//! new day always begins with a fresh selection.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  observation::{ObservationDraft, QuantityInput},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
  pub store:      String,
  pub shift:      String,
  pub staff:      String,
  /// Local calendar date on which the session was started.
  pub started_on: NaiveDate,
}

impl SessionContext {
  /// Start a session on `today`. Blank fields are rejected together.
  pub fn start(
    store: impl Into<String>,
    shift: impl Into<String>,
    staff: impl Into<String>,
    today: NaiveDate,
  ) -> Result<Self> {
    let (store, shift, staff) = (store.into(), shift.into(), staff.into());
    let missing: Vec<&'static str> = [("store", &store), ("shift", &shift), ("staff", &staff)]
      .into_iter()
      .filter_map(|(name, value)| value.trim().is_empty().then_some(name))
      .collect();
    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }

    Ok(Self {
      store: store.trim().to_owned(),
      shift: shift.trim().to_owned(),
      staff: staff.trim().to_owned(),
      started_on: today,
    })
  }

  /// The local instant at which this session stops being valid.
  pub fn expires_at(&self) -> NaiveDateTime {
    self
      .started_on
      .succ_opt()
      .unwrap_or(NaiveDate::MAX)
      .and_time(NaiveTime::MIN)
  }

  /// Whether the session has lapsed at local time `now`.
  pub fn is_expired(&self, now: NaiveDateTime) -> bool { now >= self.expires_at() }

  /// A submission pre-filled with this session's store, shift and staff.
  pub fn draft(
    &self,
    item_id: impl Into<String>,
    quantity: Option<QuantityInput>,
    expiry: impl Into<String>,
  ) -> ObservationDraft {
    ObservationDraft {
      item_id: Some(item_id.into()),
      store: Some(self.store.clone()),
      shift: Some(self.shift.clone()),
      staff: Some(self.staff.clone()),
      quantity,
      expiry: Some(expiry.into()),
      ..Default::default()
    }
  }
}
