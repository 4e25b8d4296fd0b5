pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/analyze-resume", post(handlers::handle_analyze_resume))
        .route(
            "/api/compare-resume-job",
            post(handlers::handle_compare_resume_job),
        )
        .with_state(state)
}
