//! HTTP handlers for journal endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::models::{EntryKind, JournalEntry, JournalFilter};

use crate::error::AppResult;
use crate::middleware::{require_manager, CurrentUser};
use crate::services::export;
use crate::services::journal::{JournalService, PostEntryInput};
use crate::AppState;

/// Post a general journal entry
pub async fn post_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<PostEntryInput>,
) -> AppResult<Json<JournalEntry>> {
    let service = JournalService::new(state.db);
    let entry = service.post(&current_user.0.username, input).await?;
    Ok(Json(entry))
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub limit: Option<i64>,
}

impl ListQuery {
    fn filter(&self) -> JournalFilter {
        JournalFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            kind: self.kind,
        }
    }
}

/// List journal entries, newest first
pub async fn list_entries(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let service = JournalService::new(state.db);
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let entries = service.list(&query.filter(), limit).await?;
    Ok(Json(entries))
}

/// Fetch one entry
pub async fn get_entry(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<JournalEntry>> {
    let service = JournalService::new(state.db);
    let entry = service.get(id).await?;
    Ok(Json(entry))
}

/// Delete an entry (manager only)
pub async fn delete_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<()>> {
    require_manager(&current_user.0)?;
    let service = JournalService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}

/// Export the filtered journal as CSV (manager only)
pub async fn export_journal_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    require_manager(&current_user.0)?;
    let service = JournalService::new(state.db);
    let limit = query.limit.unwrap_or(10_000).clamp(1, 100_000);
    let entries = service.list(&query.filter(), limit).await?;
    let body = export::journal_csv(&entries)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"journal.csv\"",
            ),
        ],
        body,
    ))
}

/// Printable receipt for one entry
pub async fn entry_receipt(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = JournalService::new(state.db);
    let entry = service.get(id).await?;
    let body = export::receipt_text(&entry);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
