pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_session_info))
        .route(
            "/api/v1/sessions/:id/resume",
            post(handlers::handle_upload_resume),
        )
        .route("/api/v1/sessions/:id/screen", post(handlers::handle_screen))
        .route("/api/v1/sessions/:id/results", get(handlers::handle_results))
        .route(
            "/api/v1/sessions/:id/wordcloud.png",
            get(handlers::handle_wordcloud_png),
        )
        .with_state(state)
}
