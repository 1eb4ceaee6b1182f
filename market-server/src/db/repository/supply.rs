//! Supply catalog and inventory ledger
//!
//! `available_stock` changes through exactly two operations: the
//! conditional decrement (checkout) and the restock (cancellation).
//! Each exists both as a standalone atomic call and as a SurrealQL
//! fragment that callers splice into their own
//! `BEGIN TRANSACTION; ...; COMMIT TRANSACTION;` script, so stock
//! movement commits or rolls back together with the caller's writes.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DecrementLine, Supply, SupplyCreate};
use crate::db::tx::{self, TxError};
use shared::supply::SupplyView;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

pub const SUPPLY_TABLE: &str = "supply";

/// Ledger failures, kept apart from generic repository errors so
/// callers can branch on them.
#[derive(Debug, Error)]
pub enum StockError {
    #[error("insufficient stock for {supply_id}: requested {requested}, available {available}")]
    Insufficient {
        supply_id: String,
        requested: i64,
        available: i64,
    },

    #[error("supply not found: {0}")]
    SupplyMissing(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl StockError {
    /// Rebuild the typed error from an `insufficient_stock|...` THROW
    /// payload. Returns `None` for payloads thrown by other guards.
    pub fn from_thrown(payload: &str) -> Option<Self> {
        let parts = tx::split_payload(payload);
        match parts.as_slice() {
            ["insufficient_stock", supply_id, requested, available] => Some(Self::Insufficient {
                supply_id: (*supply_id).to_string(),
                requested: requested.parse().ok()?,
                available: available.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// Script fragment: decrement stock for every entry of `$lines`
/// (`{supply, quantity}` objects) or abort the whole transaction.
///
/// The `WHERE available_stock >= $line.quantity` clause makes check and
/// decrement one write; a line that matches nothing throws
/// `insufficient_stock|<supply id>|<requested>|<available>`, where a
/// vanished supply reports 0 available.
pub const DECREMENT_FRAGMENT: &str = r#"
    FOR $line IN $lines {
        LET $target = $line.supply;
        LET $wanted = $line.quantity;
        LET $hit = UPDATE $target
            SET available_stock -= $wanted
            WHERE available_stock >= $wanted;
        IF array::len($hit) == 0 {
            LET $left = (SELECT VALUE available_stock FROM $target)[0] ?? 0;
            THROW 'insufficient_stock|' + <string>$target + '|'
                + <string>$wanted + '|' + <string>$left;
        };
    };
"#;

/// Script fragment: return stock for every item of `$order_id`.
///
/// UPDATE on a record that no longer exists is a no-op, so supplies
/// deleted since purchase are skipped without failing the transaction.
pub const RESTOCK_FRAGMENT: &str = r#"
    FOR $item IN (SELECT supply, quantity FROM order_item WHERE order_id = $order_id) {
        LET $target = $item.supply;
        UPDATE $target SET available_stock += $item.quantity;
    };
"#;

/// Supply repository: catalog reads plus the inventory ledger
#[derive(Debug, Clone)]
pub struct SupplyRepository {
    base: BaseRepository,
}

impl SupplyRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: SupplyCreate) -> RepoResult<Supply> {
        let created: Option<Supply> = self.base.db().create(SUPPLY_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("supply create returned nothing".to_string()))
    }

    /// Full catalog, alphabetical
    pub async fn find_all(&self) -> RepoResult<Vec<SupplyView>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT <string>id AS id, name, unit, unit_price, available_stock \
                 FROM supply ORDER BY name",
            )
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn find_view(&self, id: &RecordId) -> RepoResult<Option<SupplyView>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT <string>id AS id, name, unit, unit_price, available_stock \
                 FROM supply WHERE id = $id",
            )
            .bind(("id", id.clone()))
            .await?;
        let rows: Vec<SupplyView> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Supply>> {
        Ok(self.base.db().select(id.clone()).await?)
    }

    /// Rows for a set of ids, in no particular order
    pub async fn find_bulk(&self, ids: Vec<RecordId>) -> RepoResult<Vec<Supply>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM supply WHERE id IN $ids")
            .bind(("ids", ids))
            .await?;
        Ok(result.take(0)?)
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        let deleted: Option<Supply> = self.base.db().delete(id.clone()).await?;
        Ok(deleted.is_some())
    }

    /// Atomically take `quantity` units, or change nothing.
    ///
    /// Runs [`DECREMENT_FRAGMENT`] as its own transaction; write
    /// conflicts are retried, business aborts are not.
    pub async fn check_and_decrement(
        &self,
        supply: &RecordId,
        quantity: i64,
    ) -> Result<(), StockError> {
        let script = format!("BEGIN TRANSACTION;\n{DECREMENT_FRAGMENT}\nCOMMIT TRANSACTION;");
        let db = self.base.db().clone();
        let lines = vec![DecrementLine {
            supply: supply.clone(),
            quantity,
        }];

        let outcome = tx::run_with_retry(|| {
            let db = db.clone();
            let script = script.clone();
            let lines = lines.clone();
            async move { db.query(script).bind(("lines", lines)).await }
        })
        .await;

        match outcome {
            Ok(_) => Ok(()),
            Err(TxError::Thrown(payload)) => Err(StockError::from_thrown(&payload)
                .unwrap_or_else(|| RepoError::Database(payload).into())),
            Err(other) => Err(RepoError::Database(other.to_string()).into()),
        }
    }

    /// Put `quantity` units back on the shelf.
    pub async fn restock(&self, supply: &RecordId, quantity: i64) -> Result<(), StockError> {
        let db = self.base.db().clone();
        let supply_id = supply.clone();

        let outcome = tx::run_with_retry(|| {
            let db = db.clone();
            let supply_id = supply_id.clone();
            async move {
                db.query("UPDATE $supply SET available_stock += $quantity")
                    .bind(("supply", supply_id))
                    .bind(("quantity", quantity))
                    .await
            }
        })
        .await;

        let mut response = outcome.map_err(|e| RepoError::Database(e.to_string()))?;
        let rows: Vec<Supply> = response.take(0).map_err(RepoError::from)?;
        if rows.is_empty() {
            return Err(StockError::SupplyMissing(supply.to_string()));
        }
        Ok(())
    }
}
