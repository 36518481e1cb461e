//! Domain models for the farm bookkeeping system

mod account;
mod inventory;
mod journal;
mod user;

pub use account::*;
pub use inventory::*;
pub use journal::*;
pub use user::*;
