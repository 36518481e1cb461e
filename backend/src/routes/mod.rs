//! Route definitions for the farm ledger server

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes
        .nest("/accounts", account_routes(state.clone()))
        .nest("/journal", journal_routes(state.clone()))
        .nest("/inventory", inventory_routes(state.clone()))
        .nest("/postings", posting_routes(state.clone()))
        .nest("/reports", report_routes(state.clone()))
        .nest("/admin", admin_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Chart of accounts routes (protected)
fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route("/names", get(handlers::account_names))
        .route("/:code", delete(handlers::delete_account))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Journal routes (protected)
fn journal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_entries).post(handlers::post_entry))
        .route("/export", get(handlers::export_journal_csv))
        .route(
            "/:id",
            get(handlers::get_entry).delete(handlers::delete_entry),
        )
        .route("/:id/receipt", get(handlers::entry_receipt))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Inventory routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/items/low-stock", get(handlers::low_stock_items))
        .route("/items/:code", get(handlers::get_item))
        .route("/items/:code/movements", get(handlers::item_movements))
        .route("/items/:code/card", get(handlers::item_card))
        .route("/movements", post(handlers::record_movement))
        .route(
            "/movements/:movement_id",
            delete(handlers::reverse_movement),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Composite posting routes (protected)
fn posting_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sales", post(handlers::record_sale))
        .route("/purchases", post(handlers::record_purchase))
        .route("/opening-balances", post(handlers::record_opening_balance))
        .route("/opening-stock", post(handlers::record_opening_stock))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Reporting routes (protected, manager only at the handler level)
fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/trial-balance", get(handlers::trial_balance))
        .route("/income-statement", get(handlers::income_statement))
        .route("/balance-sheet", get(handlers::balance_sheet))
        .route("/general-ledger", get(handlers::general_ledger))
        .route("/general-ledger/export", get(handlers::general_ledger_csv))
        .route("/dashboard", get(handlers::dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Administrative routes (protected)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/factory-reset", post(handlers::factory_reset))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
