//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // BOOKFINDER_CORS_ORIGINS can be comma-separated list of origins, or "*" for any
    let cors = match std::env::var("BOOKFINDER_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Some(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => {
            // Default: allow localhost origins for development
            CorsLayer::new()
                .allow_origin(AllowOrigin::list([
                    HeaderValue::from_static("http://localhost:3000"),
                    HeaderValue::from_static("http://localhost:5173"),
                    HeaderValue::from_static("http://127.0.0.1:3000"),
                    HeaderValue::from_static("http://127.0.0.1:5173"),
                ]))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let api_routes = Router::new()
        // Search screen
        .route(
            "/search",
            get(handlers::get_search)
                .post(handlers::submit_search)
                .delete(handlers::clear_search),
        )
        .route("/search/page/:page", post(handlers::change_page))
        .route("/search/first", post(handlers::first_page))
        .route("/search/previous", post(handlers::previous_page))
        .route("/search/next", post(handlers::next_page))
        .route("/search/last", post(handlers::last_page))
        // Detail screen
        .route("/book/:id", get(handlers::get_book))
        // Favourites screen
        .route(
            "/favourites",
            get(handlers::list_favourites).post(handlers::toggle_favourite),
        )
        // SSE endpoint
        .route("/sync", get(handlers::sync_events));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
