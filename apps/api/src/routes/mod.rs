pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation_handlers;
use crate::render::handlers as render_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/models",
            get(generation_handlers::handle_list_models),
        )
        .route(
            "/api/v1/resumes/generate",
            post(generation_handlers::handle_generate),
        )
        .route(
            "/api/v1/resumes/export",
            post(render_handlers::handle_export),
        )
        .with_state(state)
}
