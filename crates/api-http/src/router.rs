//! Route table

use crate::handler;
use crate::state::AppState;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Queue operations, mounted at the root and under `/api`
fn queue_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/queue/join",
            get(handler::get_join_status).post(handler::join),
        )
        .route(
            "/queue/leave",
            get(handler::get_leave_status).post(handler::leave),
        )
        .route("/queue/{restaurant_id}", get(handler::get_status))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(queue_routes())
        .nest("/api", queue_routes())
        .route("/health", get(handler::health))
        .route("/admin/stats", get(handler::stats))
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}
