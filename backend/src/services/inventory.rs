//! Inventory ledger service
//!
//! Tracks quantity on hand per item and keeps it consistent with the
//! movement log. Movements that carry financial effect are recorded by the
//! composite posting operations, which pair them with journal entries in
//! the same transaction.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use shared::ledger::{stock_card, CardRow};
use shared::models::{
    InventoryItem, MovementDirection, MovementKind, StockMovement,
};
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::services::parse_stored;

/// Inventory ledger service
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Inventory item row as stored
#[derive(Debug, FromRow)]
pub(crate) struct ItemRow {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity_on_hand: Decimal,
    pub reorder_threshold: Decimal,
    pub asset_account: Option<String>,
    pub cogs_account: Option<String>,
    pub standard_unit_cost: Decimal,
}

impl ItemRow {
    pub(crate) fn into_model(self) -> InventoryItem {
        InventoryItem {
            code: self.code,
            name: self.name,
            category: self.category,
            unit: self.unit,
            quantity_on_hand: self.quantity_on_hand,
            reorder_threshold: self.reorder_threshold,
            asset_account: self.asset_account,
            cogs_account: self.cogs_account,
            standard_unit_cost: self.standard_unit_cost,
        }
    }
}

/// Stock movement row as stored
#[derive(Debug, FromRow)]
pub(crate) struct MovementRow {
    pub id: i64,
    pub date: NaiveDate,
    pub item_code: String,
    pub direction: String,
    pub kind: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub note: String,
    pub created_by: String,
}

impl MovementRow {
    pub(crate) fn into_model(self) -> AppResult<StockMovement> {
        let direction: MovementDirection = parse_stored(&self.direction)?;
        let kind: MovementKind = parse_stored(&self.kind)?;
        Ok(StockMovement {
            id: self.id,
            date: self.date,
            item_code: self.item_code,
            direction,
            kind,
            quantity: self.quantity,
            unit_price: self.unit_price,
            note: self.note,
            created_by: self.created_by,
        })
    }
}

/// Input for creating an inventory item
#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub reorder_threshold: Decimal,
    #[serde(default)]
    pub asset_account: Option<String>,
    #[serde(default)]
    pub cogs_account: Option<String>,
    #[serde(default)]
    pub standard_unit_cost: Decimal,
}

/// Input for recording a bare stock movement (no journal effect)
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub item_code: String,
    pub direction: MovementDirection,
    #[serde(default = "default_movement_kind")]
    pub kind: MovementKind,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
}

fn default_movement_kind() -> MovementKind {
    MovementKind::Adjustment
}

/// Lock an item row for update inside a transaction
pub(crate) async fn lock_item(
    tx: &mut Transaction<'_, Postgres>,
    item_code: &str,
) -> AppResult<InventoryItem> {
    let row = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT code, name, category, unit, quantity_on_hand, reorder_threshold,
               asset_account, cogs_account, standard_unit_cost
        FROM inventory_items WHERE code = $1
        FOR UPDATE
        "#,
    )
    .bind(item_code)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

    Ok(row.into_model())
}

/// Apply a movement to a locked item: stock guard, quantity update, and the
/// movement log insert, all on the open transaction.
pub(crate) async fn apply_movement(
    tx: &mut Transaction<'_, Postgres>,
    item: &mut InventoryItem,
    direction: MovementDirection,
    kind: MovementKind,
    quantity: Decimal,
    unit_price: Decimal,
    date: NaiveDate,
    note: &str,
    created_by: &str,
) -> AppResult<StockMovement> {
    item.apply_movement(direction, quantity)?;

    sqlx::query("UPDATE inventory_items SET quantity_on_hand = $1 WHERE code = $2")
        .bind(item.quantity_on_hand)
        .bind(&item.code)
        .execute(&mut **tx)
        .await?;

    let row = sqlx::query_as::<_, MovementRow>(
        r#"
        INSERT INTO stock_movements (date, item_code, direction, kind, quantity, unit_price, note, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, date, item_code, direction, kind, quantity, unit_price, note, created_by
        "#,
    )
    .bind(date)
    .bind(&item.code)
    .bind(direction.as_str())
    .bind(kind.as_str())
    .bind(quantity)
    .bind(unit_price)
    .bind(note)
    .bind(created_by)
    .fetch_one(&mut **tx)
    .await?;

    row.into_model()
}

impl InventoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an inventory item with zero opening quantity
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<InventoryItem> {
        validation::validate_code(&input.code)
            .map_err(|msg| AppError::validation("code", msg))?;
        if input.name.trim().is_empty() {
            return Err(AppError::validation("name", "Item name is required"));
        }
        validation::validate_unit_price(input.standard_unit_cost)
            .map_err(|msg| AppError::validation("standard_unit_cost", msg))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory_items WHERE code = $1 OR name = $2",
        )
        .bind(&input.code)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateKey("item code or name".to_string()));
        }

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO inventory_items
                (code, name, category, unit, quantity_on_hand, reorder_threshold,
                 asset_account, cogs_account, standard_unit_cost)
            VALUES ($1, $2, $3, $4, 0, $5, $6, $7, $8)
            RETURNING code, name, category, unit, quantity_on_hand, reorder_threshold,
                      asset_account, cogs_account, standard_unit_cost
            "#,
        )
        .bind(&input.code)
        .bind(input.name.trim())
        .bind(&input.category)
        .bind(&input.unit)
        .bind(input.reorder_threshold)
        .bind(&input.asset_account)
        .bind(&input.cogs_account)
        .bind(input.standard_unit_cost)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_model())
    }

    /// List the item catalogue ordered by name
    pub async fn list_items(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT code, name, category, unit, quantity_on_hand, reorder_threshold,
                   asset_account, cogs_account, standard_unit_cost
            FROM inventory_items ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_model).collect())
    }

    /// Look up one item by code
    pub async fn get_item(&self, code: &str) -> AppResult<InventoryItem> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT code, name, category, unit, quantity_on_hand, reorder_threshold,
                   asset_account, cogs_account, standard_unit_cost
            FROM inventory_items WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        Ok(row.into_model())
    }

    /// Items at or below their reorder threshold
    pub async fn low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT code, name, category, unit, quantity_on_hand, reorder_threshold,
                   asset_account, cogs_account, standard_unit_cost
            FROM inventory_items
            WHERE quantity_on_hand <= reorder_threshold
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_model).collect())
    }

    /// Record a stock movement with no journal effect (count adjustments).
    /// OUT movements exceeding the quantity on hand are rejected.
    pub async fn record_movement(
        &self,
        created_by: &str,
        input: RecordMovementInput,
    ) -> AppResult<StockMovement> {
        validation::validate_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;
        validation::validate_unit_price(input.unit_price)
            .map_err(|msg| AppError::validation("unit_price", msg))?;

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.db.begin().await?;
        let mut item = lock_item(&mut tx, &input.item_code).await?;
        let movement = apply_movement(
            &mut tx,
            &mut item,
            input.direction,
            input.kind,
            input.quantity,
            input.unit_price,
            date,
            &input.note,
            created_by,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            item = %movement.item_code,
            direction = movement.direction.as_str(),
            quantity = %movement.quantity,
            "stock movement recorded"
        );

        Ok(movement)
    }

    /// Reverse a movement: apply the opposite quantity adjustment and
    /// delete the movement record. Used when the paired journal entry is
    /// deleted by the operator.
    pub async fn reverse_movement(&self, movement_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, date, item_code, direction, kind, quantity, unit_price, note, created_by
            FROM stock_movements WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(movement_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock movement".to_string()))?;
        let movement = row.into_model()?;

        let mut item = lock_item(&mut tx, &movement.item_code).await?;
        item.unapply_movement(&movement);

        sqlx::query("UPDATE inventory_items SET quantity_on_hand = $1 WHERE code = $2")
            .bind(item.quantity_on_hand)
            .bind(&item.code)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM stock_movements WHERE id = $1")
            .bind(movement_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(movement_id, item = %movement.item_code, "stock movement reversed");
        Ok(())
    }

    /// Movements for one item in chronological order
    pub async fn movements_for_item(&self, code: &str) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, date, item_code, direction, kind, quantity, unit_price, note, created_by
            FROM stock_movements
            WHERE item_code = $1
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(code)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MovementRow::into_model).collect()
    }

    /// The item's stock card: opening row plus one row per movement with a
    /// running balance
    pub async fn card(&self, code: &str) -> AppResult<Vec<CardRow>> {
        let item = self.get_item(code).await?;
        let movements = self.movements_for_item(code).await?;
        Ok(stock_card(&item, &movements))
    }
}
