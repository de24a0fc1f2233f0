//! Router configuration for the HTTP surface.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::echo_handler;
use crate::handlers::{self, AppState};
use crate::view_handler;

/// Build the application router with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/apis", get(handlers::api_index))
        // JSON lookups
        .route("/apis/citizens", get(handlers::get_citizen))
        .route(
            "/apis/citizens/relationships",
            get(handlers::get_relationships),
        )
        .route("/apis/licences/chariots", get(handlers::get_chariot_licence))
        .route("/apis/fines/speeding", get(handlers::get_speeding_fines))
        .route("/apis/fines/parking", get(handlers::get_parking_fines))
        // HTML table views
        .route("/apis/citizens-view", get(view_handler::citizens_view))
        .route(
            "/apis/citizens/relationships-view",
            get(view_handler::relationships_view),
        )
        .route("/apis/chariots-view", get(view_handler::chariots_view))
        .route("/apis/speeding-view", get(view_handler::speeding_view))
        // Echo: any method on any path under the /apis/echo prefix
        .fallback(echo_handler::echo_or_not_found)
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(1024 * 1024)));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::Database;

    #[tokio::test]
    async fn test_router_creation() {
        let db = Database::in_memory().await.unwrap();
        let state = Arc::new(AppState::new(Config::default(), db.pool.clone()).unwrap());
        let _router = create_router(state);
    }
}
