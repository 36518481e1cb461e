//! HTTP request handlers for the farm ledger server

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod journal;
pub mod postings;
pub mod reports;

pub use accounts::*;
pub use admin::*;
pub use auth::*;
pub use health::*;
pub use inventory::*;
pub use journal::*;
pub use postings::*;
pub use reports::*;
