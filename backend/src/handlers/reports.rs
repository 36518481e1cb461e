//! HTTP handlers for the reporting endpoints (manager only)

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use shared::ledger::{BalanceSheet, GeneralLedger, IncomeStatement, TrialBalance};

use crate::error::AppResult;
use crate::middleware::{require_manager, CurrentUser};
use crate::services::export;
use crate::services::reporting::{DashboardSummary, ReportingService};
use crate::AppState;

pub async fn trial_balance(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<TrialBalance>> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    Ok(Json(service.trial_balance().await?))
}

pub async fn income_statement(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<IncomeStatement>> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    Ok(Json(service.income_statement().await?))
}

pub async fn balance_sheet(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<BalanceSheet>> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    Ok(Json(service.balance_sheet().await?))
}

/// The account is passed as a query parameter because names contain spaces
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    pub account: String,
}

pub async fn general_ledger(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<GeneralLedger>> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    Ok(Json(service.general_ledger(&query.account).await?))
}

/// General ledger as a CSV download
pub async fn general_ledger_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LedgerQuery>,
) -> AppResult<impl IntoResponse> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    let ledger = service.general_ledger(&query.account).await?;
    let body = export::general_ledger_csv(&ledger)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"general_ledger.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn dashboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DashboardSummary>> {
    require_manager(&current_user.0)?;
    let service = ReportingService::new(state.db);
    Ok(Json(service.dashboard().await?))
}
