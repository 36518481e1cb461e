//! Chart of accounts service

use serde::Deserialize;
use sqlx::{FromRow, PgPool};

use shared::models::{Account, AccountType, CostCategory};
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::services::parse_stored;

/// Service for managing the chart of accounts
#[derive(Clone)]
pub struct AccountService {
    db: PgPool,
}

/// Account row as stored
#[derive(Debug, FromRow)]
struct AccountRow {
    code: String,
    name: String,
    account_type: String,
    is_contra: bool,
    cost_category: Option<String>,
}

impl AccountRow {
    fn into_model(self) -> AppResult<Account> {
        let account_type: AccountType = parse_stored(&self.account_type)?;
        let cost_category = self
            .cost_category
            .as_deref()
            .map(parse_stored::<CostCategory>)
            .transpose()?;
        Ok(Account {
            code: self.code,
            name: self.name,
            account_type,
            is_contra: self.is_contra,
            cost_category,
        })
    }
}

/// Input for creating an account
#[derive(Debug, Deserialize)]
pub struct CreateAccountInput {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub is_contra: bool,
    #[serde(default)]
    pub cost_category: Option<CostCategory>,
}

impl AccountService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a new account. Fails with `DuplicateKey` when the code or
    /// the name is already taken.
    pub async fn create(&self, input: CreateAccountInput) -> AppResult<Account> {
        validation::validate_code(&input.code)
            .map_err(|msg| AppError::validation("code", msg))?;
        if input.name.trim().is_empty() {
            return Err(AppError::validation("name", "Account name is required"));
        }

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts WHERE code = $1 OR name = $2",
        )
        .bind(&input.code)
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::DuplicateKey("account code or name".to_string()));
        }

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (code, name, account_type, is_contra, cost_category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING code, name, account_type, is_contra, cost_category
            "#,
        )
        .bind(&input.code)
        .bind(input.name.trim())
        .bind(input.account_type.as_str())
        .bind(input.is_contra)
        .bind(input.cost_category.map(|c| c.as_str()))
        .fetch_one(&self.db)
        .await?;

        row.into_model()
    }

    /// List the full chart of accounts in code order
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT code, name, account_type, is_contra, cost_category FROM accounts ORDER BY code",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AccountRow::into_model).collect()
    }

    /// Account names matching any of the requested types, ordered by code
    pub async fn names_by_type(&self, types: &[AccountType]) -> AppResult<Vec<String>> {
        let type_strs: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM accounts WHERE account_type = ANY($1) ORDER BY code",
        )
        .bind(&type_strs)
        .fetch_all(&self.db)
        .await?;

        Ok(names)
    }

    /// Look up one account by its display name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT code, name, account_type, is_contra, cost_category FROM accounts WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        row.into_model()
    }

    /// Delete an account by code. Accounts referenced by posted journal
    /// entries cannot be removed; deleting them would orphan the entries.
    pub async fn delete(&self, code: &str) -> AppResult<()> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM accounts WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        let references = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM journal_entries WHERE debit_account = $1 OR credit_account = $1",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await?;

        if references > 0 {
            return Err(AppError::Conflict(format!(
                "Account '{}' is referenced by {} journal entries",
                name, references
            )));
        }

        sqlx::query("DELETE FROM accounts WHERE code = $1")
            .bind(code)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
