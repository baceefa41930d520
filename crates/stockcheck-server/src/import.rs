//! Catalog import from a JSON file.
//!
//! The file is an array of objects with `name`, `category` and optionally
//! `item_id`, `sub_category` and `shelf_life_days`.

use std::path::Path;

use anyhow::Context as _;
use stockcheck_core::{item::NewItem, store::StockLog};

pub fn parse_catalog(source: &str) -> anyhow::Result<Vec<NewItem>> {
  serde_json::from_str(source).context("catalog file is not a JSON array of items")
}

/// Insert every item in `items`, stopping at the first failure.
pub async fn import_items<S>(log: &S, items: Vec<NewItem>) -> anyhow::Result<usize>
where
  S: StockLog,
{
  let mut count = 0;
  for item in items {
    let name = item.name.clone();
    log
      .add_item(item)
      .await
      .with_context(|| format!("failed to import item {name:?}"))?;
    count += 1;
  }
  Ok(count)
}

pub async fn import_file<S>(log: &S, path: &Path) -> anyhow::Result<usize>
where
  S: StockLog,
{
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading catalog file {}", path.display()))?;
  import_items(log, parse_catalog(&raw)?).await
}

#[cfg(test)]
mod tests {
  use stockcheck_store_sqlite::SqliteStore;

  use super::*;

  #[tokio::test]
  async fn imports_items_with_and_without_ids() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let items = parse_catalog(
      r#"[
        {"item_id": "6f1c9f4e-8d1b-4a51-9a0e-2b7c3d4e5f60", "name": "Mayo", "category": "Sauces"},
        {"name": "Milk", "category": "Dairy", "sub_category": "Fresh", "shelf_life_days": 7}
      ]"#,
    )
    .unwrap();

    assert_eq!(import_items(&store, items).await.unwrap(), 2);

    let listed = store.list_items().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Milk");
    assert_eq!(listed[0].shelf_life_days, 7);
    assert_eq!(listed[1].item_id.to_string(), "6f1c9f4e-8d1b-4a51-9a0e-2b7c3d4e5f60");
  }

  #[test]
  fn rejects_non_array() {
    assert!(parse_catalog(r#"{"name": "Milk"}"#).is_err());
  }
}
