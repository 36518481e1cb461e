//! Inventory item and stock movement models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ledger::LedgerError;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    In,
    Out,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::In => "in",
            MovementDirection::Out => "out",
        }
    }

    /// The signed contribution of one unit to quantity on hand
    pub fn sign(&self) -> Decimal {
        match self {
            MovementDirection::In => Decimal::ONE,
            MovementDirection::Out => -Decimal::ONE,
        }
    }

    pub fn opposite(&self) -> MovementDirection {
        match self {
            MovementDirection::In => MovementDirection::Out,
            MovementDirection::Out => MovementDirection::In,
        }
    }
}

impl FromStr for MovementDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementDirection::In),
            "out" => Ok(MovementDirection::Out),
            other => Err(format!("unknown movement direction: {}", other)),
        }
    }
}

/// Why a stock movement happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Opening,
    Purchase,
    Sale,
    Adjustment,
    Reversal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Opening => "opening",
            MovementKind::Purchase => "purchase",
            MovementKind::Sale => "sale",
            MovementKind::Adjustment => "adjustment",
            MovementKind::Reversal => "reversal",
        }
    }
}

impl FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opening" => Ok(MovementKind::Opening),
            "purchase" => Ok(MovementKind::Purchase),
            "sale" => Ok(MovementKind::Sale),
            "adjustment" => Ok(MovementKind::Adjustment),
            "reversal" => Ok(MovementKind::Reversal),
            other => Err(format!("unknown movement kind: {}", other)),
        }
    }
}

/// One IN/OUT movement in an item's stock log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub date: NaiveDate,
    pub item_code: String,
    pub direction: MovementDirection,
    pub kind: MovementKind,
    pub quantity: Decimal,
    /// Transactional price per unit; zero means "value at standard cost"
    pub unit_price: Decimal,
    pub note: String,
    pub created_by: String,
}

impl StockMovement {
    /// Signed quantity: positive for IN, negative for OUT
    pub fn signed_quantity(&self) -> Decimal {
        self.direction.sign() * self.quantity
    }
}

/// A stock-keeping item in the inventory catalogue
///
/// `quantity_on_hand` is a cached running total; it must always equal the
/// signed sum of the item's movement log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity_on_hand: Decimal,
    pub reorder_threshold: Decimal,
    /// Inventory asset account debited on purchase, credited on COGS
    pub asset_account: Option<String>,
    /// Expense account debited when goods are consumed by a sale
    pub cogs_account: Option<String>,
    /// Valuation fallback for movements recorded without a price
    pub standard_unit_cost: Decimal,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity_on_hand <= self.reorder_threshold
    }

    /// Apply a movement to the cached quantity. OUT movements that exceed
    /// the quantity on hand are rejected and leave the item untouched.
    pub fn apply_movement(
        &mut self,
        direction: MovementDirection,
        quantity: Decimal,
    ) -> Result<(), LedgerError> {
        if direction == MovementDirection::Out && quantity > self.quantity_on_hand {
            return Err(LedgerError::InsufficientStock {
                item: self.code.clone(),
                requested: quantity,
                on_hand: self.quantity_on_hand,
            });
        }
        self.quantity_on_hand += direction.sign() * quantity;
        Ok(())
    }

    /// Undo a previously applied movement by adjusting in the opposite
    /// direction. No stock guard here: reversing an IN whose goods were
    /// already consumed mirrors the stored log exactly.
    pub fn unapply_movement(&mut self, movement: &StockMovement) {
        self.quantity_on_hand -= movement.signed_quantity();
    }
}
