//! HTTP handlers for chart of accounts endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::str::FromStr;

use shared::models::{Account, AccountType};

use crate::error::{AppError, AppResult};
use crate::middleware::{require_manager, CurrentUser};
use crate::services::accounts::{AccountService, CreateAccountInput};
use crate::AppState;

/// Create an account (manager only)
pub async fn create_account(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateAccountInput>,
) -> AppResult<Json<Account>> {
    require_manager(&current_user.0)?;
    let service = AccountService::new(state.db);
    let account = service.create(input).await?;
    Ok(Json(account))
}

/// List the chart of accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Account>>> {
    let service = AccountService::new(state.db);
    let accounts = service.list().await?;
    Ok(Json(accounts))
}

/// Query for the account name picker
#[derive(Debug, Deserialize)]
pub struct NamesQuery {
    /// Comma-separated account types, e.g. `asset,expense`
    pub types: String,
}

/// Account names filtered by type, for transaction entry forms
pub async fn account_names(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<NamesQuery>,
) -> AppResult<Json<Vec<String>>> {
    let types = query
        .types
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(AccountType::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|msg| AppError::validation("types", msg))?;

    let service = AccountService::new(state.db);
    let names = service.names_by_type(&types).await?;
    Ok(Json(names))
}

/// Delete an account by code (manager only)
pub async fn delete_account(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<()>> {
    require_manager(&current_user.0)?;
    let service = AccountService::new(state.db);
    service.delete(&code).await?;
    Ok(Json(()))
}
