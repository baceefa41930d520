//! Latest-observation reduction.
//!
//! The log only ever grows, so "how many of X are on the shelf" is answered by
//! taking the newest observation for X. Given rows already ordered newest
//! first, that is a single first-seen-wins scan.

use std::collections::{HashMap, hash_map::Entry};

use uuid::Uuid;

use crate::{
  observation::Observation,
  store::{RECENT_OBSERVATION_LIMIT, StockLog},
};

/// The current observation per item for one store. Derived, never stored.
///
/// Iteration follows first-seen order of the input, i.e. most recent first.
#[derive(Debug, Clone, Default)]
pub struct CurrentStock {
  order:   Vec<Uuid>,
  by_item: HashMap<Uuid, Observation>,
}

impl CurrentStock {
  pub fn get(&self, item_id: &Uuid) -> Option<&Observation> { self.by_item.get(item_id) }

  pub fn len(&self) -> usize { self.order.len() }

  pub fn is_empty(&self) -> bool { self.order.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &Observation> + '_ {
    self.order.iter().filter_map(|id| self.by_item.get(id))
  }
}

/// Collapse `observations` to one entry per item.
///
/// The input **must** be ordered by `created_at` descending: no timestamps are
/// compared here, the first occurrence of each `item_id` wins. Rows without an
/// `item_id` are skipped.
pub fn latest_per_item<I>(observations: I) -> CurrentStock
where
  I: IntoIterator<Item = Observation>,
{
  let mut current = CurrentStock::default();
  for obs in observations {
    let Some(item_id) = obs.item_id else { continue };
    if let Entry::Vacant(slot) = current.by_item.entry(item_id) {
      slot.insert(obs);
      current.order.push(item_id);
    }
  }
  current
}

/// Read the bounded recent log for `store` and reduce it.
pub async fn load_current_stock<S>(log: &S, store: &str) -> Result<CurrentStock, S::Error>
where
  S: StockLog,
{
  let recent = log.recent_observations(store, RECENT_OBSERVATION_LIMIT).await?;
  Ok(latest_per_item(recent))
}
