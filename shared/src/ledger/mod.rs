//! The pure ledger engine
//!
//! Reports are recomputed from the full entry history on every call; there
//! is no incremental aggregation or cached state. Given identical inputs
//! every function here returns identical output.

mod card;
mod reports;

pub use card::*;
pub use reports::*;

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the posting and inventory rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("insufficient stock for {item}: requested {requested}, on hand {on_hand}")]
    InsufficientStock {
        item: String,
        requested: Decimal,
        on_hand: Decimal,
    },

    #[error("unknown account: {0}")]
    UnknownAccount(String),
}
