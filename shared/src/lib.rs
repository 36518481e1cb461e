//! Shared types and the ledger engine for the Hasna Farm bookkeeping system
//!
//! This crate contains the domain models, input validation, and the pure
//! posting/reporting engine used by the backend. Nothing in here performs
//! I/O: every report is a derivation over in-memory slices of journal
//! entries and accounts, so the accounting rules can be tested directly.

pub mod ledger;
pub mod models;
pub mod validation;

pub use ledger::*;
pub use models::*;
pub use validation::*;
