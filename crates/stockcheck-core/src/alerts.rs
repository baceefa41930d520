//! Alert derivation over the current per-item state of a store.
//!
//! Three derivations exist:
//!
//! - [`expiry_alerts`]: items already expired or expiring within the next
//!   [`ALERT_WINDOW_HOURS`] hours, soonest first.
//! - [`low_stock_in_window`]: the subset of expiry alerts with a recorded
//!   quantity of at most [`LOW_STOCK_THRESHOLD`], excluding sauces. Order is
//!   inherited from its input.
//! - [`zero_stock_alerts`]: every current item with a recorded quantity of
//!   exactly zero, most recently logged first.
//!
//! The two low-stock rules differ in both threshold and scope. That mirrors
//! what the dashboard and the out-of-stock endpoint have always shown, and is
//! kept as-is until product decides which one is intended.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{observation::Observation, reduce::CurrentStock};

/// Width of the rolling window, from the moment of computation, inside which
/// an expiry raises an alert.
pub const ALERT_WINDOW_HOURS: i64 = 24;

/// Largest quantity still counted as low stock in the window variant.
pub const LOW_STOCK_THRESHOLD: u32 = 2;

/// Categories never flagged by [`low_stock_in_window`], compared
/// case-insensitively.
pub const LOW_STOCK_EXEMPT_CATEGORIES: [&str; 2] = ["sauce", "sauces"];

/// Display name used when an observation carries no item name.
pub const FALLBACK_ITEM_NAME: &str = "Item";

// ─── Alert entries ───────────────────────────────────────────────────────────

/// An item whose current observation expires inside the alert window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAlert {
  pub item_id:      Uuid,
  pub name:         String,
  pub category:     Option<String>,
  pub sub_category: Option<String>,
  /// The expiry as logged.
  pub expiry:       String,
  /// `expiry` interpreted as an instant; the sort key.
  pub expires_at:   DateTime<Utc>,
  pub quantity:     Option<u32>,
  pub created_at:   DateTime<Utc>,
}

/// An item whose current observation records a quantity of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroStockAlert {
  pub item_id:      Uuid,
  pub name:         String,
  pub category:     Option<String>,
  pub sub_category: Option<String>,
  pub expiry:       String,
  pub quantity:     u32,
  pub store:        String,
  pub staff:        String,
  pub created_at:   DateTime<Utc>,
}

fn display_name(obs: &Observation) -> String {
  obs
    .item_name
    .as_deref()
    .map(str::trim)
    .filter(|n| !n.is_empty())
    .unwrap_or(FALLBACK_ITEM_NAME)
    .to_owned()
}

// ─── Derivations ─────────────────────────────────────────────────────────────

/// Items whose expiry is at or before `now + 24h`, ascending by expiry.
///
/// Observations whose expiry does not parse are left out. The sort is stable,
/// so items with equal expiry keep the most-recent-first order of `current`.
pub fn expiry_alerts(current: &CurrentStock, now: DateTime<Utc>) -> Vec<ExpiryAlert> {
  let horizon = now + TimeDelta::hours(ALERT_WINDOW_HOURS);

  let mut alerts: Vec<ExpiryAlert> = current
    .iter()
    .filter_map(|obs| {
      let item_id = obs.item_id?;
      let expires_at = obs.expires_at()?;
      (expires_at <= horizon).then(|| ExpiryAlert {
        item_id,
        name: display_name(obs),
        category: obs.category.clone(),
        sub_category: obs.sub_category.clone(),
        expiry: obs.expiry.clone(),
        expires_at,
        quantity: obs.quantity,
        created_at: obs.created_at,
      })
    })
    .collect();

  alerts.sort_by_key(|a| a.expires_at);
  alerts
}

fn is_exempt_category(category: Option<&str>) -> bool {
  category.is_some_and(|c| {
    let c = c.trim();
    LOW_STOCK_EXEMPT_CATEGORIES
      .iter()
      .any(|exempt| c.eq_ignore_ascii_case(exempt))
  })
}

/// Low-stock items among the expiry alerts: recorded quantity at most
/// [`LOW_STOCK_THRESHOLD`] and not a sauce. An unrecorded quantity never
/// qualifies.
pub fn low_stock_in_window(window: &[ExpiryAlert]) -> Vec<&ExpiryAlert> {
  window
    .iter()
    .filter(|a| a.quantity.is_some_and(|q| q <= LOW_STOCK_THRESHOLD))
    .filter(|a| !is_exempt_category(a.category.as_deref()))
    .collect()
}

/// Every current item with a recorded quantity of exactly zero, regardless
/// of category, most recently logged first.
pub fn zero_stock_alerts(current: &CurrentStock) -> Vec<ZeroStockAlert> {
  let mut alerts: Vec<ZeroStockAlert> = current
    .iter()
    .filter(|obs| obs.quantity == Some(0))
    .filter_map(|obs| {
      Some(ZeroStockAlert {
        item_id:      obs.item_id?,
        name:         display_name(obs),
        category:     obs.category.clone(),
        sub_category: obs.sub_category.clone(),
        expiry:       obs.expiry.clone(),
        quantity:     0,
        store:        obs.store.clone(),
        staff:        obs.staff.clone(),
        created_at:   obs.created_at,
      })
    })
    .collect();

  alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  alerts
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::reduce::latest_per_item;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() }

  struct Row {
    item:     Uuid,
    name:     Option<&'static str>,
    category: Option<&'static str>,
    quantity: Option<u32>,
    expiry:   &'static str,
    age_mins: i64,
  }

  impl Row {
    fn new(item: Uuid, expiry: &'static str, age_mins: i64) -> Self {
      Self { item, name: Some("Milk"), category: Some("Dairy"), quantity: Some(5), expiry, age_mins }
    }

    fn qty(mut self, q: Option<u32>) -> Self {
      self.quantity = q;
      self
    }

    fn category(mut self, c: Option<&'static str>) -> Self {
      self.category = c;
      self
    }

    fn into_observation(self) -> Observation {
      Observation {
        observation_id: Uuid::new_v4(),
        item_id:        Some(self.item),
        item_name:      self.name.map(Into::into),
        category:       self.category.map(Into::into),
        sub_category:   None,
        store:          "A".into(),
        shift:          "AM".into(),
        staff:          "Sam".into(),
        quantity:       self.quantity,
        expiry:         self.expiry.into(),
        created_at:     now() - TimeDelta::minutes(self.age_mins),
      }
    }
  }

  /// Build current state from rows given newest first.
  fn current(rows: Vec<Row>) -> CurrentStock {
    latest_per_item(rows.into_iter().map(Row::into_observation))
  }

  // ── Expiry ────────────────────────────────────────────────────────────────

  #[test]
  fn window_is_rolling_24_hours_not_calendar_days() {
    let (today, tomorrow, day_after) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    // now = 2024-05-01T09:00Z; horizon = 2024-05-02T09:00Z.
    let state = current(vec![
      Row::new(today, "2024-05-01", 1),
      Row::new(tomorrow, "2024-05-02", 2),
      Row::new(day_after, "2024-05-03", 3),
    ]);

    let ids: Vec<Uuid> = expiry_alerts(&state, now()).iter().map(|a| a.item_id).collect();
    assert_eq!(ids, vec![today, tomorrow]);
  }

  #[test]
  fn boundary_is_inclusive() {
    let item = Uuid::new_v4();
    let state = current(vec![Row::new(item, "2024-05-02T09:00:00Z", 1)]);
    assert_eq!(expiry_alerts(&state, now()).len(), 1);

    let state = current(vec![Row::new(item, "2024-05-02T09:00:01Z", 1)]);
    assert!(expiry_alerts(&state, now()).is_empty());
  }

  #[test]
  fn already_expired_items_sort_first() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let state = current(vec![
      Row::new(a, "2024-05-02", 1),
      Row::new(b, "2024-04-20", 2),
      Row::new(c, "2024-05-01", 3),
    ]);

    let alerts = expiry_alerts(&state, now());
    let ids: Vec<Uuid> = alerts.iter().map(|a| a.item_id).collect();
    assert_eq!(ids, vec![b, c, a]);
    assert!(alerts.windows(2).all(|w| w[0].expires_at <= w[1].expires_at));
  }

  #[test]
  fn unparsable_expiry_never_alerts() {
    let (good, bad) = (Uuid::new_v4(), Uuid::new_v4());
    let state = current(vec![
      Row::new(bad, "soon", 1),
      Row::new(good, "2024-05-01", 2),
    ]);

    let alerts = expiry_alerts(&state, now());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].item_id, good);
  }

  #[test]
  fn only_the_current_observation_counts() {
    let item = Uuid::new_v4();
    // Newest row moves expiry out of the window.
    let state = current(vec![
      Row::new(item, "2024-05-10", 1),
      Row::new(item, "2024-05-01", 60),
    ]);
    assert!(expiry_alerts(&state, now()).is_empty());
  }

  #[test]
  fn missing_name_falls_back_to_generic_label() {
    let item = Uuid::new_v4();
    let mut row = Row::new(item, "2024-05-01", 1);
    row.name = None;
    let alerts = expiry_alerts(&current(vec![row]), now());
    assert_eq!(alerts[0].name, FALLBACK_ITEM_NAME);
  }

  // ── Low stock (window) ────────────────────────────────────────────────────

  #[test]
  fn sauces_are_exempt_from_window_low_stock() {
    let (sauce, dairy, plenty, unknown) =
      (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let state = current(vec![
      Row::new(sauce, "2024-05-01", 1).qty(Some(2)).category(Some("Sauces")),
      Row::new(dairy, "2024-05-01", 2).qty(Some(2)).category(Some("Dairy")),
      Row::new(plenty, "2024-05-01", 3).qty(Some(3)).category(Some("Dairy")),
      Row::new(unknown, "2024-05-01", 4).qty(None),
    ]);

    let window = expiry_alerts(&state, now());
    let low: Vec<Uuid> = low_stock_in_window(&window).iter().map(|a| a.item_id).collect();
    assert_eq!(low, vec![dairy]);
  }

  #[test]
  fn sauce_match_ignores_case_and_singular_plural() {
    assert!(is_exempt_category(Some("sauce")));
    assert!(is_exempt_category(Some(" SAUCES ")));
    assert!(!is_exempt_category(Some("Sauce Packets")));
    assert!(!is_exempt_category(None));
  }

  #[test]
  fn window_low_stock_keeps_expiry_order() {
    let (late, early) = (Uuid::new_v4(), Uuid::new_v4());
    let state = current(vec![
      Row::new(late, "2024-05-02", 1).qty(Some(0)),
      Row::new(early, "2024-04-30", 2).qty(Some(1)),
    ]);
    let window = expiry_alerts(&state, now());
    let low: Vec<Uuid> = low_stock_in_window(&window).iter().map(|a| a.item_id).collect();
    assert_eq!(low, vec![early, late]);
  }

  // ── Zero stock ────────────────────────────────────────────────────────────

  #[test]
  fn zero_stock_ignores_category_and_sorts_newest_first() {
    let (older, newer, one, unrecorded) =
      (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let state = current(vec![
      Row::new(one, "2030-01-01", 1).qty(Some(1)),
      Row::new(newer, "2030-01-01", 5).qty(Some(0)).category(Some("Sauces")),
      Row::new(unrecorded, "2030-01-01", 7).qty(None),
      Row::new(older, "2030-01-01", 10).qty(Some(0)),
    ]);

    let alerts = zero_stock_alerts(&state);
    let ids: Vec<Uuid> = alerts.iter().map(|a| a.item_id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert!(alerts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
  }

  #[test]
  fn zero_stock_and_window_low_stock_disagree_outside_the_window() {
    // Item X logged at qty 5, then at qty 0 with a far-off expiry.
    let x = Uuid::new_v4();
    let state = current(vec![
      Row::new(x, "2030-01-01", 1).qty(Some(0)),
      Row::new(x, "2024-05-01", 60).qty(Some(5)),
    ]);

    assert_eq!(state.get(&x).unwrap().quantity, Some(0));
    assert_eq!(zero_stock_alerts(&state).len(), 1);

    let window = expiry_alerts(&state, now());
    assert!(low_stock_in_window(&window).is_empty());
  }
}
