//! Journal posting tests
//!
//! Entry-time validation rules, listing filters, and the core invariant:
//! because every posting carries exactly one debit and one credit leg of
//! the same amount, the books balance after any posting history.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::ledger::trial_balance;
use shared::models::{Account, AccountType, EntryKind, JournalEntry, JournalFilter};
use shared::validation;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn account(code: &str, name: &str, account_type: AccountType) -> Account {
    Account {
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        is_contra: false,
        cost_category: None,
    }
}

fn entry(id: i64, day: u32, debit: &str, credit: &str, amount: &str) -> JournalEntry {
    JournalEntry {
        id,
        date: date(day),
        description: format!("entry {}", id),
        debit_account: debit.to_string(),
        credit_account: credit.to_string(),
        amount: dec(amount),
        kind: EntryKind::General,
        created_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
        created_by: "admin".to_string(),
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn zero_amount_is_rejected() {
        assert!(validation::validate_amount(Decimal::ZERO).is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(validation::validate_amount(dec("-100")).is_err());
    }

    #[test]
    fn positive_amount_is_accepted() {
        assert!(validation::validate_amount(dec("0.01")).is_ok());
    }

    #[test]
    fn short_description_is_rejected() {
        assert!(validation::validate_description("ab").is_err());
        assert!(validation::validate_description("  a  ").is_err());
    }

    #[test]
    fn same_account_on_both_legs_is_rejected() {
        assert!(validation::validate_distinct_legs("Kas", "Kas").is_err());
        assert!(validation::validate_distinct_legs("Kas", "Bank Mandiri").is_ok());
    }

    #[test]
    fn posting_validation_combines_all_rules() {
        assert!(validation::validate_posting("Egg sale", "Kas", "Penjualan", dec("500")).is_ok());
        assert!(validation::validate_posting("x", "Kas", "Penjualan", dec("500")).is_err());
        assert!(validation::validate_posting("Egg sale", "Kas", "Kas", dec("500")).is_err());
        assert!(validation::validate_posting("Egg sale", "Kas", "Penjualan", dec("0")).is_err());
    }

    #[test]
    fn legs_must_exist_in_chart() {
        let chart = vec![
            account("1-11", "Kas", AccountType::Asset),
            account("4-11", "Penjualan Telur Puyuh", AccountType::Revenue),
        ];
        assert!(validation::validate_legs_exist(&chart, "Kas", "Penjualan Telur Puyuh").is_ok());
        assert_eq!(
            validation::validate_legs_exist(&chart, "Kas", "Tidak Ada"),
            Err("Tidak Ada")
        );
    }

    #[test]
    fn composite_leg_pairs_with_one_account_are_rejected() {
        // Sales, purchases, and opening stock pick their own leg pairs;
        // a request naming the same account on both sides must fail the
        // same distinct-legs rule as a plain posting.
        assert!(validation::validate_distinct_legs(
            "Penjualan Telur Puyuh",
            "Penjualan Telur Puyuh"
        )
        .is_err());
        assert!(
            validation::validate_distinct_legs("Persediaan Pakan", "Persediaan Pakan").is_err()
        );
        assert!(validation::validate_distinct_legs(
            "Historical Balancing",
            "Historical Balancing"
        )
        .is_err());
    }

    #[test]
    fn code_format_is_enforced() {
        assert!(validation::validate_code("1-11").is_ok());
        assert!(validation::validate_code("PKN-MERAH").is_ok());
        assert!(validation::validate_code("").is_err());
        assert!(validation::validate_code("lower-case").is_err());
        assert!(validation::validate_code("HAS SPACE").is_err());
    }
}

// ============================================================================
// Filter and Kind Tests
// ============================================================================

#[cfg(test)]
mod filter_tests {
    use super::*;

    #[test]
    fn entry_kind_round_trips_through_storage_form() {
        for kind in [
            EntryKind::Sale,
            EntryKind::Purchase,
            EntryKind::CostOfGoods,
            EntryKind::Opening,
            EntryKind::General,
        ] {
            assert_eq!(EntryKind::from_str(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        assert!(EntryKind::from_str("refund").is_err());
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = JournalFilter::default();
        assert!(filter.matches(&entry(1, 5, "Kas", "Penjualan Telur Puyuh", "100")));
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let filter = JournalFilter {
            start_date: Some(date(5)),
            end_date: Some(date(10)),
            kind: None,
        };
        assert!(!filter.matches(&entry(1, 4, "Kas", "Penjualan Telur Puyuh", "100")));
        assert!(filter.matches(&entry(2, 5, "Kas", "Penjualan Telur Puyuh", "100")));
        assert!(filter.matches(&entry(3, 10, "Kas", "Penjualan Telur Puyuh", "100")));
        assert!(!filter.matches(&entry(4, 11, "Kas", "Penjualan Telur Puyuh", "100")));
    }

    #[test]
    fn kind_filter_selects_only_matching_entries() {
        let filter = JournalFilter {
            start_date: None,
            end_date: None,
            kind: Some(EntryKind::Sale),
        };
        let mut sale = entry(1, 5, "Kas", "Penjualan Telur Puyuh", "100");
        sale.kind = EntryKind::Sale;
        assert!(filter.matches(&sale));
        assert!(!filter.matches(&entry(2, 5, "Kas", "Penjualan Telur Puyuh", "100")));
    }

    #[test]
    fn touches_checks_both_legs() {
        let e = entry(1, 5, "Kas", "Penjualan Telur Puyuh", "100");
        assert!(e.touches("Kas"));
        assert!(e.touches("Penjualan Telur Puyuh"));
        assert!(!e.touches("Bank Mandiri"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn chart() -> Vec<Account> {
        vec![
            account("1-11", "Kas", AccountType::Asset),
            account("1-13", "Piutang Dagang", AccountType::Asset),
            account("2-11", "Hutang Usaha", AccountType::Liability),
            account("3-11", "Modal Pemilik", AccountType::Equity),
            account("4-11", "Penjualan Telur Puyuh", AccountType::Revenue),
            account("5-13", "Beban Pakan", AccountType::Expense),
        ]
    }

    fn leg_strategy() -> impl Strategy<Value = usize> {
        0usize..6
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total debits equal total credits for any posting history, and
        /// for every prefix of it. Each entry posts the same amount to one
        /// debit and one credit leg, so imbalance is impossible.
        #[test]
        fn prop_books_balance_after_every_posting(
            legs in prop::collection::vec((leg_strategy(), leg_strategy(), amount_strategy()), 1..40)
        ) {
            let chart = chart();
            let mut entries = Vec::new();
            let mut id = 1i64;

            for (debit_idx, credit_idx, amount) in legs {
                if debit_idx == credit_idx {
                    continue;
                }
                let mut e = entry(id, 1, &chart[debit_idx].name, &chart[credit_idx].name, "1");
                e.amount = amount;
                entries.push(e);
                id += 1;

                let tb = trial_balance(&chart, &entries);
                prop_assert!(tb.is_balanced(), "unbalanced after {} postings", entries.len());
            }
        }

        /// The trial balance totals equal the sum of per-row columns.
        #[test]
        fn prop_trial_balance_totals_are_column_sums(
            legs in prop::collection::vec((leg_strategy(), leg_strategy(), amount_strategy()), 1..40)
        ) {
            let chart = chart();
            let mut entries = Vec::new();
            let mut id = 1i64;
            for (debit_idx, credit_idx, amount) in legs {
                if debit_idx == credit_idx {
                    continue;
                }
                let mut e = entry(id, 1, &chart[debit_idx].name, &chart[credit_idx].name, "1");
                e.amount = amount;
                entries.push(e);
                id += 1;
            }

            let tb = trial_balance(&chart, &entries);
            let debit_sum: Decimal = tb.rows.iter().map(|r| r.debit).sum();
            let credit_sum: Decimal = tb.rows.iter().map(|r| r.credit).sum();
            prop_assert_eq!(tb.total_debit, debit_sum);
            prop_assert_eq!(tb.total_credit, credit_sum);
        }

        /// Filters never accept an entry outside their date range.
        #[test]
        fn prop_filter_respects_date_bounds(
            day in 1u32..=28,
            start in 1u32..=28,
            end in 1u32..=28
        ) {
            prop_assume!(start <= end);
            let filter = JournalFilter {
                start_date: Some(date(start)),
                end_date: Some(date(end)),
                kind: None,
            };
            let e = entry(1, day, "Kas", "Penjualan Telur Puyuh", "100");
            prop_assert_eq!(filter.matches(&e), day >= start && day <= end);
        }
    }
}
