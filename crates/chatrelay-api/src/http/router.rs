//! Axum router configuration with middleware.
//!
//! All relay routes are under `/api`. Middleware: CORS (wide open, the web
//! app is served from another origin) and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatrelay_core::telegram::TelegramGateway;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<G: TelegramGateway + 'static>(state: AppState<G>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/send-code", post(handlers::auth::send_code::<G>))
        .route("/sign-in", post(handlers::auth::sign_in::<G>))
        .route("/chats/{phone_number}", get(handlers::chats::list_chats::<G>))
        .route("/messages", post(handlers::messages::chat_history::<G>));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Liveness string, kept for parity with the web app's probe.
async fn root() -> &'static str {
    "Hello"
}

/// GET /health - Health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
