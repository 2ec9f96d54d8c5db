use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/quizzes",
            get(handlers::list_quizzes).post(handlers::create_quiz),
        )
        .route("/api/quizzes/{id}", get(handlers::get_quiz))
        .route(
            "/api/attempts",
            get(handlers::list_attempts).post(handlers::submit_attempt),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
