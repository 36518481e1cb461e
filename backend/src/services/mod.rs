//! Business logic services for the farm ledger server

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod export;
pub mod inventory;
pub mod journal;
pub mod posting;
pub mod reporting;

pub use accounts::AccountService;
pub use admin::AdminService;
pub use auth::AuthService;
pub use inventory::InventoryService;
pub use journal::JournalService;
pub use posting::PostingService;
pub use reporting::ReportingService;

use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Parse an enum stored as text in the database. A parse failure here means
/// the stored data is corrupt, not that the request was bad.
pub(crate) fn parse_stored<T>(value: &str) -> AppResult<T>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt stored value: {}", e)))
}
