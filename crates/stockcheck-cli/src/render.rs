//! Plain-text rendering of API results for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use stockcheck_core::{
  alerts::{ExpiryAlert, LOW_STOCK_THRESHOLD, ZeroStockAlert},
  item::Item,
};

fn quantity(q: Option<u32>) -> String { q.map_or_else(|| "-".to_string(), |n| n.to_string()) }

/// Catalog grouped under category / sub-category headings.
pub fn items(items: &[Item]) -> String {
  let mut out = String::new();
  let mut heading: Option<(&str, Option<&str>)> = None;
  for item in items {
    let this = (item.category.as_str(), item.sub_category.as_deref());
    if heading != Some(this) {
      let label = match this.1 {
        Some(sub) => format!("{} / {}", this.0, sub),
        None => this.0.to_string(),
      };
      writeln!(out, "{label}").ok();
      heading = Some(this);
    }
    writeln!(out, "  {}  {}  (shelf life {}d)", item.item_id, item.name, item.shelf_life_days).ok();
  }
  if out.is_empty() {
    out.push_str("No items in the catalog.\n");
  }
  out
}

/// Expiry alerts, marking items whose expiry has already passed.
pub fn expiry_alerts(alerts: &[ExpiryAlert], now: DateTime<Utc>) -> String {
  if alerts.is_empty() {
    return "Nothing expires in the next 24 hours.\n".to_string();
  }
  let mut out = String::from("Expiring within 24 hours:\n");
  for a in alerts {
    let marker = if a.expires_at <= now { "EXPIRED" } else { "soon" };
    writeln!(out, "  [{marker:>7}] {:<24} expiry {:<10} qty {}", a.name, a.expiry, quantity(a.quantity))
      .ok();
  }
  out
}

/// Low stock among the expiring items (quantity at most the threshold, sauces
/// excluded).
pub fn low_stock_in_window(alerts: &[&ExpiryAlert]) -> String {
  if alerts.is_empty() {
    return "No low stock among expiring items.\n".to_string();
  }
  let mut out = format!("Low stock (≤{LOW_STOCK_THRESHOLD}) among expiring items:\n");
  for a in alerts {
    writeln!(out, "  {:<24} qty {}", a.name, quantity(a.quantity)).ok();
  }
  out
}

/// Items whose latest count is zero.
pub fn zero_stock(alerts: &[ZeroStockAlert]) -> String {
  if alerts.is_empty() {
    return "No items are out of stock.\n".to_string();
  }
  let mut out = String::from("Out of stock:\n");
  for a in alerts {
    writeln!(
      out,
      "  {:<24} logged {} by {}",
      a.name,
      a.created_at.format("%Y-%m-%d %H:%M"),
      a.staff
    )
    .ok();
  }
  out
}
