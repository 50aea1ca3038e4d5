//! Axum router configuration with middleware.
//!
//! All data-entry routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.
//!
//! A built front-end can be served from `ANSWERDESK_WEB_DIR`. API routes take
//! priority; unknown paths fall through to its `index.html`. If the variable
//! is unset or the directory does not exist, only the API is served.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/status", get(handlers::status::get_status))
        // One-question form
        .route(
            "/sessions/{session}/current",
            get(handlers::session::current),
        )
        .route("/sessions/{session}/skip", post(handlers::session::skip))
        .route("/sessions/{session}/save", post(handlers::session::save))
        .route("/sessions/{session}/reset", post(handlers::session::reset))
        // Per-company bulk form
        .route("/companies", get(handlers::company::list_companies))
        .route(
            "/companies/{id}/questions",
            get(handlers::company::list_questions).post(handlers::company::create_question),
        )
        .route(
            "/companies/{id}/answers",
            put(handlers::company::save_answers),
        )
        // Feedback
        .route("/feedback", post(handlers::feedback::submit));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Ok(web_dir) = std::env::var("ANSWERDESK_WEB_DIR") {
        if std::path::Path::new(&web_dir).exists() {
            let index_path = format!("{web_dir}/index.html");
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "front-end static file serving enabled");
        } else {
            tracing::warn!(path = %web_dir, "ANSWERDESK_WEB_DIR does not exist, serving API only");
        }
    }

    router
}

/// GET /health - liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
