//! HTTP handlers for composite posting operations

use axum::{extract::State, Json};

use shared::models::JournalEntry;

use crate::error::AppResult;
use crate::middleware::{require_manager, CurrentUser};
use crate::services::posting::{
    OpeningBalanceInput, OpeningStockInput, OpeningStockReceipt, PostingService, PurchaseReceipt,
    RecordPurchaseInput, RecordSaleInput, SaleReceipt,
};
use crate::AppState;

/// Record a sale (stock out plus revenue and cost entries)
pub async fn record_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<Json<SaleReceipt>> {
    let service = PostingService::new(state.db);
    let receipt = service.record_sale(&current_user.0.username, input).await?;
    Ok(Json(receipt))
}

/// Record a purchase (stock in plus asset entry)
pub async fn record_purchase(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordPurchaseInput>,
) -> AppResult<Json<PurchaseReceipt>> {
    let service = PostingService::new(state.db);
    let receipt = service
        .record_purchase(&current_user.0.username, input)
        .await?;
    Ok(Json(receipt))
}

/// Record an opening account balance (manager only)
pub async fn record_opening_balance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<OpeningBalanceInput>,
) -> AppResult<Json<JournalEntry>> {
    require_manager(&current_user.0)?;
    let service = PostingService::new(state.db);
    let entry = service
        .record_opening_balance(&current_user.0.username, input)
        .await?;
    Ok(Json(entry))
}

/// Record opening stock on hand (manager only)
pub async fn record_opening_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<OpeningStockInput>,
) -> AppResult<Json<OpeningStockReceipt>> {
    require_manager(&current_user.0)?;
    let service = PostingService::new(state.db);
    let receipt = service
        .record_opening_stock(&current_user.0.username, input)
        .await?;
    Ok(Json(receipt))
}
