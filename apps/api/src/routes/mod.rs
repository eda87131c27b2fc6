pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::letter::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/letter", get(handlers::handle_get_letter))
        .route("/api/v1/letter/form", get(handlers::handle_get_form))
        .route(
            "/api/v1/letter/draft",
            get(handlers::handle_get_draft).patch(handlers::handle_update_draft),
        )
        .route("/api/v1/letter/generate", post(handlers::handle_generate))
        .with_state(state)
}
