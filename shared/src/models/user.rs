//! User and role models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// User roles. Managers administer master data and reports; staff record
/// day-to-day transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }

    /// Chart of accounts and inventory catalogue changes
    pub fn can_manage_master_data(&self) -> bool {
        matches!(self, Role::Manager)
    }

    /// Financial statements and exports
    pub fn can_view_reports(&self) -> bool {
        matches!(self, Role::Manager)
    }

    /// Entry deletion, movement reversal, factory reset
    pub fn can_delete_transactions(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
