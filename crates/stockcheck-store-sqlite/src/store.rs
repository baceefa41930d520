//! [`SqliteStore`]: the SQLite implementation of [`StockLog`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use stockcheck_core::{
  item::{Item, NewItem},
  observation::{NewObservation, Observation},
  store::StockLog,
};

use crate::{
  Result,
  encode::{
    ITEM_COLUMNS, OBSERVATION_COLUMNS, RawItem, RawObservation, encode_dt, encode_quantity,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A stock log backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Observation`] into the `observations` table.
  async fn insert_observation(&self, obs: &Observation) -> Result<()> {
    let observation_id = encode_uuid(obs.observation_id);
    let item_id        = obs.item_id.map(encode_uuid);
    let item_name      = obs.item_name.clone();
    let category       = obs.category.clone();
    let sub_category   = obs.sub_category.clone();
    let store          = obs.store.clone();
    let shift          = obs.shift.clone();
    let staff          = obs.staff.clone();
    let quantity       = encode_quantity(obs.quantity);
    let expiry         = obs.expiry.clone();
    let created_at     = encode_dt(obs.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO observations (
             observation_id, item_id, item_name, category, sub_category,
             store, shift, staff, quantity, expiry, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            observation_id,
            item_id,
            item_name,
            category,
            sub_category,
            store,
            shift,
            staff,
            quantity,
            expiry,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StockLog impl ───────────────────────────────────────────────────────────

impl StockLog for SqliteStore {
  type Error = crate::Error;

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn add_item(&self, input: NewItem) -> Result<Item> {
    let item = Item {
      item_id:         input.item_id.unwrap_or_else(Uuid::new_v4),
      name:            input.name,
      category:        input.category,
      sub_category:    input.sub_category,
      shelf_life_days: input.shelf_life_days,
    };

    let id_str       = encode_uuid(item.item_id);
    let name         = item.name.clone();
    let category     = item.category.clone();
    let sub_category = item.sub_category.clone();
    let shelf_life   = item.shelf_life_days;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO items (item_id, name, category, sub_category, shelf_life_days)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, category, sub_category, shelf_life],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(item_id = %item.item_id, name = %item.name, "catalog item added");
    Ok(item)
  }

  async fn get_item(&self, id: Uuid) -> Result<Option<Item>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
              rusqlite::params![id_str],
              RawItem::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  async fn list_items(&self) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ITEM_COLUMNS} FROM items"
        ))?;
        let rows = stmt
          .query_map([], RawItem::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut items = raws
      .into_iter()
      .map(RawItem::into_item)
      .collect::<Result<Vec<_>>>()?;
    items.sort_by(Item::catalog_order);
    Ok(items)
  }

  // ── Observations ──────────────────────────────────────────────────────────

  async fn record_observation(&self, input: NewObservation) -> Result<Observation> {
    let obs = Observation {
      observation_id: Uuid::new_v4(),
      item_id:        Some(input.item_id),
      item_name:      input.item_name,
      category:       input.category,
      sub_category:   input.sub_category,
      store:          input.store,
      shift:          input.shift,
      staff:          input.staff,
      quantity:       input.quantity,
      expiry:         input.expiry,
      // Stored at microsecond precision; truncate so the returned row matches.
      created_at:     Utc::now().trunc_subsecs(6),
    };

    self.insert_observation(&obs).await?;
    Ok(obs)
  }

  async fn recent_observations(&self, store: &str, limit: usize) -> Result<Vec<Observation>> {
    let store_name = store.to_owned();
    let limit_val  = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawObservation> = self
      .conn
      .call(move |conn| {
        // rowid breaks ties between rows recorded within the same microsecond.
        let mut stmt = conn.prepare(&format!(
          "SELECT {OBSERVATION_COLUMNS}
           FROM observations
           WHERE store = ?1
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![store_name, limit_val], RawObservation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawObservation::into_observation).collect()
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Append a fully-specified row, bypassing validation and the server clock.
  /// Lets tests seed legacy rows and control `created_at`.
  pub(crate) async fn insert_raw(&self, obs: &Observation) -> Result<()> {
    self.insert_observation(obs).await
  }
}
