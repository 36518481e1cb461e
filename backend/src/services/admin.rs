//! Administrative operations

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Administrative service for destructive maintenance operations
#[derive(Clone)]
pub struct AdminService {
    db: PgPool,
}

/// What a factory reset removed
#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub journal_entries_deleted: u64,
    pub stock_movements_deleted: u64,
    pub items_zeroed: u64,
}

impl AdminService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Wipe all transactional data and zero every quantity on hand.
    /// Master data (accounts, items, users) is kept.
    pub async fn factory_reset(&self) -> AppResult<ResetSummary> {
        let mut tx = self.db.begin().await?;

        let entries = sqlx::query("DELETE FROM journal_entries")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let movements = sqlx::query("DELETE FROM stock_movements")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let items = sqlx::query("UPDATE inventory_items SET quantity_on_hand = 0")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::warn!(
            journal_entries = entries,
            stock_movements = movements,
            "factory reset performed"
        );

        Ok(ResetSummary {
            journal_entries_deleted: entries,
            stock_movements_deleted: movements,
            items_zeroed: items,
        })
    }
}
