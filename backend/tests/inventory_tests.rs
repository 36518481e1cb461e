//! Inventory ledger tests
//!
//! Quantity-on-hand bookkeeping, the negative stock guard, movement
//! reversal, and the stock card report.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::ledger::stock_card;
use shared::models::{InventoryItem, MovementDirection, MovementKind, StockMovement};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn item(quantity: &str, standard_cost: &str) -> InventoryItem {
    InventoryItem {
        code: "TELUR".to_string(),
        name: "Telur Puyuh".to_string(),
        category: "Produk".to_string(),
        unit: "Dus".to_string(),
        quantity_on_hand: dec(quantity),
        reorder_threshold: dec("10"),
        asset_account: Some("Persediaan Telur Puyuh".to_string()),
        cogs_account: Some("HPP Telur Puyuh".to_string()),
        standard_unit_cost: dec(standard_cost),
    }
}

fn movement(
    id: i64,
    day: u32,
    direction: MovementDirection,
    kind: MovementKind,
    quantity: &str,
    unit_price: &str,
) -> StockMovement {
    StockMovement {
        id,
        date: date(day),
        item_code: "TELUR".to_string(),
        direction,
        kind,
        quantity: dec(quantity),
        unit_price: dec(unit_price),
        note: format!("movement {}", id),
        created_by: "admin".to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn in_movement_increases_quantity() {
        let mut item = item("10", "285000");
        item.apply_movement(MovementDirection::In, dec("5")).unwrap();
        assert_eq!(item.quantity_on_hand, dec("15"));
    }

    #[test]
    fn out_movement_decreases_quantity() {
        let mut item = item("10", "285000");
        item.apply_movement(MovementDirection::Out, dec("4")).unwrap();
        assert_eq!(item.quantity_on_hand, dec("6"));
    }

    #[test]
    fn out_movement_beyond_stock_is_rejected() {
        let mut item = item("3", "285000");
        let result = item.apply_movement(MovementDirection::Out, dec("5"));
        assert!(result.is_err());
        // The failed movement must not change the cached quantity
        assert_eq!(item.quantity_on_hand, dec("3"));
    }

    #[test]
    fn out_movement_to_exactly_zero_is_allowed() {
        let mut item = item("5", "285000");
        item.apply_movement(MovementDirection::Out, dec("5")).unwrap();
        assert_eq!(item.quantity_on_hand, Decimal::ZERO);
    }

    #[test]
    fn unapply_undoes_an_in_movement() {
        let mut item = item("0", "285000");
        let m = movement(1, 5, MovementDirection::In, MovementKind::Purchase, "8", "300000");
        item.apply_movement(m.direction, m.quantity).unwrap();
        item.unapply_movement(&m);
        assert_eq!(item.quantity_on_hand, Decimal::ZERO);
    }

    #[test]
    fn unapply_undoes_an_out_movement() {
        let mut item = item("10", "285000");
        let m = movement(1, 5, MovementDirection::Out, MovementKind::Sale, "4", "0");
        item.apply_movement(m.direction, m.quantity).unwrap();
        item.unapply_movement(&m);
        assert_eq!(item.quantity_on_hand, dec("10"));
    }

    #[test]
    fn low_stock_triggers_at_threshold() {
        let mut item = item("10", "285000");
        assert!(item.is_low_stock());
        item.quantity_on_hand = dec("10.001");
        assert!(!item.is_low_stock());
    }

    #[test]
    fn signed_quantity_follows_direction() {
        let m_in = movement(1, 1, MovementDirection::In, MovementKind::Purchase, "7", "0");
        let m_out = movement(2, 2, MovementDirection::Out, MovementKind::Sale, "7", "0");
        assert_eq!(m_in.signed_quantity(), dec("7"));
        assert_eq!(m_out.signed_quantity(), dec("-7"));
    }

    #[test]
    fn direction_opposite_round_trips() {
        assert_eq!(MovementDirection::In.opposite(), MovementDirection::Out);
        assert_eq!(MovementDirection::Out.opposite().opposite(), MovementDirection::Out);
    }
}

// ============================================================================
// Stock Card Tests
// ============================================================================

#[cfg(test)]
mod card_tests {
    use super::*;

    #[test]
    fn opening_movement_becomes_first_row_without_date() {
        let item = item("0", "285000");
        let movements = vec![
            movement(2, 10, MovementDirection::Out, MovementKind::Sale, "3", "0"),
            movement(1, 5, MovementDirection::In, MovementKind::Opening, "20", "0"),
        ];

        let card = stock_card(&item, &movements);
        assert_eq!(card.len(), 2);

        let opening = &card[0];
        assert!(opening.date.is_none());
        assert_eq!(opening.description, "Opening balance");
        assert!(opening.inbound.is_none());
        assert!(opening.outbound.is_none());
        assert_eq!(opening.balance.quantity, dec("20"));
        // Opening stock is valued at standard cost
        assert_eq!(opening.balance.unit_price, dec("285000"));
    }

    #[test]
    fn running_balance_tracks_movements_in_order() {
        let item = item("0", "285000");
        let movements = vec![
            movement(1, 1, MovementDirection::In, MovementKind::Opening, "10", "0"),
            movement(2, 3, MovementDirection::In, MovementKind::Purchase, "5", "250000"),
            movement(3, 7, MovementDirection::Out, MovementKind::Sale, "8", "320000"),
        ];

        let card = stock_card(&item, &movements);
        assert_eq!(card.len(), 3);
        assert_eq!(card[0].balance.quantity, dec("10"));
        assert_eq!(card[1].balance.quantity, dec("15"));
        assert_eq!(card[2].balance.quantity, dec("7"));
    }

    #[test]
    fn zero_price_movements_fall_back_to_standard_cost() {
        let item = item("0", "285000");
        let movements = vec![movement(
            1, 2, MovementDirection::In, MovementKind::Purchase, "4", "0",
        )];

        let card = stock_card(&item, &movements);
        let inbound = card[0].inbound.unwrap();
        assert_eq!(inbound.unit_price, dec("285000"));
        assert_eq!(inbound.value, dec("1140000"));
    }

    #[test]
    fn balance_is_valued_at_latest_transaction_price() {
        let item = item("0", "285000");
        let movements = vec![
            movement(1, 1, MovementDirection::In, MovementKind::Purchase, "10", "250000"),
            movement(2, 5, MovementDirection::In, MovementKind::Purchase, "10", "300000"),
        ];

        let card = stock_card(&item, &movements);
        // The second row's balance uses the price of its own movement, not
        // a weighted average of the two lots.
        assert_eq!(card[1].balance.quantity, dec("20"));
        assert_eq!(card[1].balance.unit_price, dec("300000"));
        assert_eq!(card[1].balance.value, dec("6000000"));
    }

    #[test]
    fn card_orders_movements_by_date_then_id() {
        let item = item("0", "100");
        let movements = vec![
            movement(3, 2, MovementDirection::In, MovementKind::Purchase, "1", "0"),
            movement(2, 2, MovementDirection::In, MovementKind::Purchase, "1", "0"),
            movement(1, 1, MovementDirection::In, MovementKind::Purchase, "1", "0"),
        ];

        let card = stock_card(&item, &movements);
        let ids: Vec<Decimal> = card.iter().map(|r| r.balance.quantity).collect();
        assert_eq!(ids, vec![dec("1"), dec("2"), dec("3")]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn direction_strategy() -> impl Strategy<Value = MovementDirection> {
        prop_oneof![Just(MovementDirection::In), Just(MovementDirection::Out)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Quantity on hand always equals the signed sum of the applied
        /// movement log.
        #[test]
        fn prop_quantity_conserved(
            moves in prop::collection::vec((direction_strategy(), quantity_strategy()), 1..30)
        ) {
            let mut item = item("0", "100");
            let mut applied = Vec::new();

            for (direction, quantity) in moves {
                if item.apply_movement(direction, quantity).is_ok() {
                    applied.push(direction.sign() * quantity);
                }
            }

            let expected: Decimal = applied.iter().sum();
            prop_assert_eq!(item.quantity_on_hand, expected);
        }

        /// The guard never lets the quantity go negative, whatever the
        /// sequence of movements.
        #[test]
        fn prop_quantity_never_negative(
            moves in prop::collection::vec((direction_strategy(), quantity_strategy()), 1..30)
        ) {
            let mut item = item("0", "100");
            for (direction, quantity) in moves {
                let _ = item.apply_movement(direction, quantity);
                prop_assert!(item.quantity_on_hand >= Decimal::ZERO);
            }
        }

        /// Applying then unapplying a movement restores the prior quantity.
        #[test]
        fn prop_reversal_restores_quantity(
            start in quantity_strategy(),
            direction in direction_strategy(),
            quantity in quantity_strategy()
        ) {
            let mut item = item("0", "100");
            item.quantity_on_hand = start;
            let before = item.quantity_on_hand;

            let m = StockMovement {
                id: 1,
                date: date(1),
                item_code: "TELUR".to_string(),
                direction,
                kind: MovementKind::Adjustment,
                quantity,
                unit_price: Decimal::ZERO,
                note: String::new(),
                created_by: "admin".to_string(),
            };

            if item.apply_movement(direction, quantity).is_ok() {
                item.unapply_movement(&m);
                prop_assert_eq!(item.quantity_on_hand, before);
            }
        }

        /// The card's final balance quantity matches the signed sum of all
        /// movements.
        #[test]
        fn prop_card_final_balance_matches_log(
            in_quantities in prop::collection::vec(quantity_strategy(), 1..10),
            out_fraction in 0u32..=100
        ) {
            let total_in: Decimal = in_quantities.iter().sum();
            let total_out = total_in * Decimal::from(out_fraction) / Decimal::from(100u32);

            let mut movements = Vec::new();
            let mut id = 1i64;
            for q in &in_quantities {
                movements.push(movement_with(id, MovementDirection::In, *q));
                id += 1;
            }
            if total_out > Decimal::ZERO {
                movements.push(movement_with(id, MovementDirection::Out, total_out));
            }

            let item = item("0", "100");
            let card = stock_card(&item, &movements);
            let final_balance = card.last().unwrap().balance.quantity;
            prop_assert_eq!(final_balance, total_in - total_out);
        }
    }

    fn movement_with(id: i64, direction: MovementDirection, quantity: Decimal) -> StockMovement {
        StockMovement {
            id,
            date: date(1),
            item_code: "TELUR".to_string(),
            direction,
            kind: MovementKind::Adjustment,
            quantity,
            unit_price: Decimal::ZERO,
            note: String::new(),
            created_by: "admin".to_string(),
        }
    }
}
