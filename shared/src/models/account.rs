//! Chart of accounts models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five account classifications of the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "asset",
            AccountType::Liability => "liability",
            AccountType::Equity => "equity",
            AccountType::Revenue => "revenue",
            AccountType::Expense => "expense",
        }
    }

    /// Whether the type carries a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(AccountType::Asset),
            "liability" => Ok(AccountType::Liability),
            "equity" => Ok(AccountType::Equity),
            "revenue" => Ok(AccountType::Revenue),
            "expense" => Ok(AccountType::Expense),
            other => Err(format!("unknown account type: {}", other)),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side on which an account's balance is conventionally positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    Debit,
    Credit,
}

/// Expense sub-category used by the income statement split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    CostOfProduction,
    GeneralAdmin,
}

impl CostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::CostOfProduction => "cost_of_production",
            CostCategory::GeneralAdmin => "general_admin",
        }
    }
}

impl FromStr for CostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost_of_production" => Ok(CostCategory::CostOfProduction),
            "general_admin" => Ok(CostCategory::GeneralAdmin),
            other => Err(format!("unknown cost category: {}", other)),
        }
    }
}

/// An account in the chart of accounts
///
/// `name` is the natural key referenced by journal entries; `code` drives
/// display ordering. Contra accounts (e.g. accumulated depreciation) carry
/// an explicit flag instead of being inferred from the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub is_contra: bool,
    pub cost_category: Option<CostCategory>,
}

impl Account {
    /// The side on which this account's balance is positive. Contra
    /// accounts flip the polarity of their category.
    pub fn normal_balance(&self) -> NormalBalance {
        let debit = self.account_type.is_debit_normal() != self.is_contra;
        if debit {
            NormalBalance::Debit
        } else {
            NormalBalance::Credit
        }
    }

    pub fn is_debit_normal(&self) -> bool {
        self.normal_balance() == NormalBalance::Debit
    }
}
