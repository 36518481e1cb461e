//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use shared::ledger::CardRow;
use shared::models::{InventoryItem, StockMovement};

use crate::error::AppResult;
use crate::middleware::{require_manager, CurrentUser};
use crate::services::inventory::{CreateItemInput, InventoryService, RecordMovementInput};
use crate::AppState;

/// Create an inventory item (manager only)
pub async fn create_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateItemInput>,
) -> AppResult<Json<InventoryItem>> {
    require_manager(&current_user.0)?;
    let service = InventoryService::new(state.db);
    let item = service.create_item(input).await?;
    Ok(Json(item))
}

/// List the item catalogue
pub async fn list_items(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let service = InventoryService::new(state.db);
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Fetch one item by code
pub async fn get_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.db);
    let item = service.get_item(&code).await?;
    Ok(Json(item))
}

/// Items at or below their reorder threshold
pub async fn low_stock_items(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let service = InventoryService::new(state.db);
    let items = service.low_stock().await?;
    Ok(Json(items))
}

/// Record a bare stock movement (count adjustment)
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<StockMovement>> {
    let service = InventoryService::new(state.db);
    let movement = service
        .record_movement(&current_user.0.username, input)
        .await?;
    Ok(Json(movement))
}

/// Reverse a stock movement (manager only)
pub async fn reverse_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(movement_id): Path<i64>,
) -> AppResult<Json<()>> {
    require_manager(&current_user.0)?;
    let service = InventoryService::new(state.db);
    service.reverse_movement(movement_id).await?;
    Ok(Json(()))
}

/// Movement history for one item
pub async fn item_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = InventoryService::new(state.db);
    let movements = service.movements_for_item(&code).await?;
    Ok(Json(movements))
}

/// Stock card for one item
pub async fn item_card(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(code): Path<String>,
) -> AppResult<Json<Vec<CardRow>>> {
    let service = InventoryService::new(state.db);
    let card = service.card(&code).await?;
    Ok(Json(card))
}
