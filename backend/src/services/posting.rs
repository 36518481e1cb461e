//! Composite posting operations
//!
//! Sales, purchases, and opening balances touch both the journal and the
//! inventory ledger. Each operation here runs in a single transaction so
//! the two sides can never drift apart.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use shared::models::{EntryKind, JournalEntry, MovementDirection, MovementKind, StockMovement};
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::services::{inventory, journal};

/// Equity contra account used as the offsetting leg of opening balances
pub const HISTORICAL_BALANCING: &str = "Historical Balancing";

/// Composite journal + inventory posting service
#[derive(Clone)]
pub struct PostingService {
    db: PgPool,
}

/// Input for recording a sale of stock
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub date: NaiveDate,
    pub item_code: String,
    pub quantity: Decimal,
    /// Selling price per unit
    pub unit_price: Decimal,
    /// Revenue account credited with the sale amount
    pub revenue_account: String,
    /// Account that receives the payment (cash or receivable)
    pub receiving_account: String,
    #[serde(default)]
    pub note: String,
}

/// Input for recording a stock purchase
#[derive(Debug, Deserialize)]
pub struct RecordPurchaseInput {
    pub date: NaiveDate,
    pub item_code: String,
    pub quantity: Decimal,
    /// Total amount paid for the whole quantity
    pub total_amount: Decimal,
    /// Account the payment comes out of (cash or payable)
    pub paying_account: String,
    #[serde(default)]
    pub note: String,
}

/// Input for recording an opening account balance
#[derive(Debug, Deserialize)]
pub struct OpeningBalanceInput {
    pub date: NaiveDate,
    pub account: String,
    pub amount: Decimal,
    /// Which side of the target account the balance sits on
    pub side: OpeningSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningSide {
    Debit,
    Credit,
}

/// Input for recording opening stock on hand
#[derive(Debug, Deserialize)]
pub struct OpeningStockInput {
    pub date: NaiveDate,
    pub item_code: String,
    pub quantity: Decimal,
    /// Cost per unit; zero falls back to the item's standard cost
    #[serde(default)]
    pub unit_cost: Decimal,
}

/// A sale posting: the stock movement, the revenue entry, and the cost
/// entry when the item carries account links
#[derive(Debug, Serialize)]
pub struct SaleReceipt {
    pub movement: StockMovement,
    pub revenue_entry: JournalEntry,
    pub cost_entry: Option<JournalEntry>,
}

/// A purchase posting: the stock movement and its journal entry
#[derive(Debug, Serialize)]
pub struct PurchaseReceipt {
    pub movement: StockMovement,
    pub entry: JournalEntry,
}

/// An opening stock posting
#[derive(Debug, Serialize)]
pub struct OpeningStockReceipt {
    pub movement: StockMovement,
    pub entry: JournalEntry,
}

impl PostingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale: stock goes OUT, revenue is credited, and when the
    /// item links an asset and a cost account, cost of goods is expensed
    /// at standard cost in the same transaction.
    pub async fn record_sale(
        &self,
        created_by: &str,
        input: RecordSaleInput,
    ) -> AppResult<SaleReceipt> {
        validation::validate_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;
        validation::validate_unit_price(input.unit_price)
            .map_err(|msg| AppError::validation("unit_price", msg))?;

        let mut tx = self.db.begin().await?;

        let mut item = inventory::lock_item(&mut tx, &input.item_code).await?;

        // Zero price falls back to standard cost so a quick sale entry
        // still carries a sensible valuation.
        let unit_price = if input.unit_price.is_zero() {
            item.standard_unit_cost
        } else {
            input.unit_price
        };
        let sale_amount = unit_price * input.quantity;
        validation::validate_amount(sale_amount)
            .map_err(|msg| AppError::validation("amount", msg))?;

        journal::ensure_legs_exist(&mut tx, &input.receiving_account, &input.revenue_account)
            .await?;

        let movement = inventory::apply_movement(
            &mut tx,
            &mut item,
            MovementDirection::Out,
            MovementKind::Sale,
            input.quantity,
            unit_price,
            input.date,
            &input.note,
            created_by,
        )
        .await?;

        let description = if input.note.trim().is_empty() {
            format!("Sale {}", item.name)
        } else {
            format!("Sale {}: {}", item.name, input.note.trim())
        };

        let revenue_entry = journal::insert_entry(
            &mut tx,
            input.date,
            &description,
            &input.receiving_account,
            &input.revenue_account,
            sale_amount,
            EntryKind::Sale,
            created_by,
        )
        .await?
        .into_model()?;

        // Auto cost-of-goods entry when the item links both accounts
        let cost_entry = match (&item.cogs_account, &item.asset_account) {
            (Some(cogs), Some(asset)) if !item.standard_unit_cost.is_zero() => {
                let cost_amount = item.standard_unit_cost * input.quantity;
                journal::ensure_legs_exist(&mut tx, cogs, asset).await?;
                let entry = journal::insert_entry(
                    &mut tx,
                    input.date,
                    &format!("Cost of goods for sale {}", item.name),
                    cogs,
                    asset,
                    cost_amount,
                    EntryKind::CostOfGoods,
                    created_by,
                )
                .await?
                .into_model()?;
                Some(entry)
            }
            _ => None,
        };

        tx.commit().await?;

        tracing::info!(
            item = %movement.item_code,
            quantity = %movement.quantity,
            amount = %sale_amount,
            "sale recorded"
        );

        Ok(SaleReceipt {
            movement,
            revenue_entry,
            cost_entry,
        })
    }

    /// Record a purchase: stock comes IN at the implied unit price and the
    /// item's asset account is debited against the paying account.
    pub async fn record_purchase(
        &self,
        created_by: &str,
        input: RecordPurchaseInput,
    ) -> AppResult<PurchaseReceipt> {
        validation::validate_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;
        validation::validate_amount(input.total_amount)
            .map_err(|msg| AppError::validation("total_amount", msg))?;

        let mut tx = self.db.begin().await?;

        let mut item = inventory::lock_item(&mut tx, &input.item_code).await?;
        let asset_account = item.asset_account.clone().ok_or_else(|| {
            AppError::validation("item_code", "Item has no linked asset account")
        })?;

        journal::ensure_legs_exist(&mut tx, &asset_account, &input.paying_account).await?;

        let unit_price = input.total_amount / input.quantity;

        let movement = inventory::apply_movement(
            &mut tx,
            &mut item,
            MovementDirection::In,
            MovementKind::Purchase,
            input.quantity,
            unit_price,
            input.date,
            &input.note,
            created_by,
        )
        .await?;

        let description = if input.note.trim().is_empty() {
            format!("Purchase {}", item.name)
        } else {
            format!("Purchase {}: {}", item.name, input.note.trim())
        };

        let entry = journal::insert_entry(
            &mut tx,
            input.date,
            &description,
            &asset_account,
            &input.paying_account,
            input.total_amount,
            EntryKind::Purchase,
            created_by,
        )
        .await?
        .into_model()?;

        tx.commit().await?;

        tracing::info!(
            item = %movement.item_code,
            quantity = %movement.quantity,
            amount = %entry.amount,
            "purchase recorded"
        );

        Ok(PurchaseReceipt { movement, entry })
    }

    /// Record an opening balance for one account, offset against the
    /// Historical Balancing equity account so the books stay balanced.
    pub async fn record_opening_balance(
        &self,
        created_by: &str,
        input: OpeningBalanceInput,
    ) -> AppResult<JournalEntry> {
        validation::validate_amount(input.amount)
            .map_err(|msg| AppError::validation("amount", msg))?;
        if input.account == HISTORICAL_BALANCING {
            return Err(AppError::validation(
                "account",
                "Cannot post an opening balance against the balancing account itself",
            ));
        }

        let (debit, credit) = match input.side {
            OpeningSide::Debit => (input.account.as_str(), HISTORICAL_BALANCING),
            OpeningSide::Credit => (HISTORICAL_BALANCING, input.account.as_str()),
        };

        let mut tx = self.db.begin().await?;
        journal::ensure_legs_exist(&mut tx, debit, credit).await?;
        let entry = journal::insert_entry(
            &mut tx,
            input.date,
            &format!("Opening balance {}", input.account),
            debit,
            credit,
            input.amount,
            EntryKind::Opening,
            created_by,
        )
        .await?
        .into_model()?;
        tx.commit().await?;

        tracing::info!(account = %input.account, amount = %entry.amount, "opening balance recorded");
        Ok(entry)
    }

    /// Record opening stock on hand: an IN movement plus a journal entry
    /// debiting the item's asset account against Historical Balancing.
    pub async fn record_opening_stock(
        &self,
        created_by: &str,
        input: OpeningStockInput,
    ) -> AppResult<OpeningStockReceipt> {
        validation::validate_quantity(input.quantity)
            .map_err(|msg| AppError::validation("quantity", msg))?;
        validation::validate_unit_price(input.unit_cost)
            .map_err(|msg| AppError::validation("unit_cost", msg))?;

        let mut tx = self.db.begin().await?;

        let mut item = inventory::lock_item(&mut tx, &input.item_code).await?;
        let asset_account = item.asset_account.clone().ok_or_else(|| {
            AppError::validation("item_code", "Item has no linked asset account")
        })?;

        let unit_cost = if input.unit_cost.is_zero() {
            item.standard_unit_cost
        } else {
            input.unit_cost
        };
        let amount = unit_cost * input.quantity;
        validation::validate_amount(amount)
            .map_err(|msg| AppError::validation("amount", msg))?;

        journal::ensure_legs_exist(&mut tx, &asset_account, HISTORICAL_BALANCING).await?;

        let movement = inventory::apply_movement(
            &mut tx,
            &mut item,
            MovementDirection::In,
            MovementKind::Opening,
            input.quantity,
            unit_cost,
            input.date,
            "Opening stock",
            created_by,
        )
        .await?;

        let entry = journal::insert_entry(
            &mut tx,
            input.date,
            &format!("Opening stock {}", item.name),
            &asset_account,
            HISTORICAL_BALANCING,
            amount,
            EntryKind::Opening,
            created_by,
        )
        .await?
        .into_model()?;

        tx.commit().await?;

        tracing::info!(
            item = %movement.item_code,
            quantity = %movement.quantity,
            amount = %entry.amount,
            "opening stock recorded"
        );

        Ok(OpeningStockReceipt { movement, entry })
    }
}
