//! HTTP handlers for administrative endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require_manager, CurrentUser};
use crate::services::admin::{AdminService, ResetSummary};
use crate::AppState;

/// Wipe all transactional data (manager only)
pub async fn factory_reset(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ResetSummary>> {
    require_manager(&current_user.0)?;
    let service = AdminService::new(state.db);
    let summary = service.factory_reset().await?;
    Ok(Json(summary))
}
