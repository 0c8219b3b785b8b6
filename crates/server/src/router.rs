//! Route table

use axum::routing::{get, put};
use axum::Router;
use revkv::Store;
use tower_http::trace::TraceLayer;

use crate::handlers::{delete_entry, get_entry, health, list_entries, put_entry};

/// Build the application router over a shared store
pub fn build_router(store: Store) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/entries", get(list_entries))
        .route(
            "/entries/:key",
            put(put_entry).get(get_entry).delete(delete_entry),
        )
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}
