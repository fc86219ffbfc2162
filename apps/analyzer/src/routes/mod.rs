pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ai/analyze-resume", post(handlers::handle_analyze))
        // GET takes a resume id, DELETE an analysis id.
        .route(
            "/api/v1/ai/analysis/:id",
            get(handlers::handle_get_analysis).delete(handlers::handle_delete_analysis),
        )
        .route("/api/v1/ai/analyses", get(handlers::handle_list_analyses))
        .with_state(state)
}
