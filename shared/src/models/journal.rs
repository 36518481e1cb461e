//! Journal entry models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What kind of business event produced a journal entry
///
/// Stored explicitly so listing filters and reports are field lookups
/// rather than substring matches on the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Sale,
    Purchase,
    CostOfGoods,
    Opening,
    General,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Sale => "sale",
            EntryKind::Purchase => "purchase",
            EntryKind::CostOfGoods => "cost_of_goods",
            EntryKind::Opening => "opening",
            EntryKind::General => "general",
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(EntryKind::Sale),
            "purchase" => Ok(EntryKind::Purchase),
            "cost_of_goods" => Ok(EntryKind::CostOfGoods),
            "opening" => Ok(EntryKind::Opening),
            "general" => Ok(EntryKind::General),
            other => Err(format!("unknown entry kind: {}", other)),
        }
    }
}

/// A double-entry journal posting: one debit leg, one credit leg, one amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl JournalEntry {
    /// Whether the entry touches the given account on either leg
    pub fn touches(&self, account: &str) -> bool {
        self.debit_account == account || self.credit_account == account
    }
}

/// Filter for journal listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
}

impl JournalFilter {
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(start) = self.start_date {
            if entry.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if entry.date > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        true
    }
}
