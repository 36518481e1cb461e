//! Inventory stock card
//!
//! A chronological per-item report: opening balance first, then one row per
//! movement with IN/OUT flow columns and a running balance. Rows are
//! produced lazily by an iterator; building a new `StockCard` restarts the
//! sequence from the top.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{InventoryItem, MovementDirection, MovementKind, StockMovement};

/// Quantity/price/value triple for one side of a card row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardFlow {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub value: Decimal,
}

impl CardFlow {
    fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            value: quantity * unit_price,
        }
    }
}

/// One row of the stock card. The opening row has no date and no flows; it
/// only seeds the running balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRow {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub inbound: Option<CardFlow>,
    pub outbound: Option<CardFlow>,
    pub balance: CardFlow,
}

/// Lazy iterator over an item's stock card rows
///
/// Movements are ordered by (date, id). The first opening IN movement is
/// lifted out as a distinguished first row valued at standard cost. Every
/// other row is valued at its own unit price, falling back to the item's
/// standard cost when the price is zero; the balance columns show the
/// latest transactional price, not a weighted average.
pub struct StockCard {
    opening: Option<StockMovement>,
    movements: std::vec::IntoIter<StockMovement>,
    standard_cost: Decimal,
    running_quantity: Decimal,
}

impl StockCard {
    pub fn new(item: &InventoryItem, movements: &[StockMovement]) -> Self {
        let mut ordered: Vec<StockMovement> = movements.to_vec();
        ordered.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        let opening_index = ordered.iter().position(|m| {
            m.kind == MovementKind::Opening && m.direction == MovementDirection::In
        });
        let opening = opening_index.map(|i| ordered.remove(i));

        Self {
            opening,
            movements: ordered.into_iter(),
            standard_cost: item.standard_unit_cost,
            running_quantity: Decimal::ZERO,
        }
    }
}

impl Iterator for StockCard {
    type Item = CardRow;

    fn next(&mut self) -> Option<CardRow> {
        if let Some(opening) = self.opening.take() {
            self.running_quantity = opening.quantity;
            return Some(CardRow {
                date: None,
                description: "Opening balance".to_string(),
                inbound: None,
                outbound: None,
                balance: CardFlow::new(self.running_quantity, self.standard_cost),
            });
        }

        let movement = self.movements.next()?;
        let price = if movement.unit_price > Decimal::ZERO {
            movement.unit_price
        } else {
            self.standard_cost
        };

        let (inbound, outbound) = match movement.direction {
            MovementDirection::In => {
                self.running_quantity += movement.quantity;
                (Some(CardFlow::new(movement.quantity, price)), None)
            }
            MovementDirection::Out => {
                self.running_quantity -= movement.quantity;
                (None, Some(CardFlow::new(movement.quantity, price)))
            }
        };

        Some(CardRow {
            date: Some(movement.date),
            description: movement.note.clone(),
            inbound,
            outbound,
            balance: CardFlow::new(self.running_quantity, price),
        })
    }
}

/// Collect the whole card at once
pub fn stock_card(item: &InventoryItem, movements: &[StockMovement]) -> Vec<CardRow> {
    StockCard::new(item, movements).collect()
}
