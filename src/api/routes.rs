use super::{handlers, ApiState};
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Watchlist routes
        .route(
            "/api/watchlist",
            get(handlers::get_watchlist).post(handlers::add_watchlist_entry),
        )
        .route(
            "/api/watchlist/transfers",
            get(handlers::get_watchlist_transfers),
        )
        .route(
            "/api/watchlist/:address",
            delete(handlers::remove_watchlist_entry).put(handlers::update_watchlist_entry),
        )
        // Wallet routes
        .route(
            "/api/wallets/:address/transfers",
            get(handlers::get_wallet_transfers),
        )
        // Status routes
        .route("/api/status/providers", get(handlers::get_provider_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
