pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs/recommendations",
            post(jobs::handle_recommendations),
        )
        // Resume API
        .route(
            "/api/v1/resumes/analyze",
            post(analysis::handle_analyze_resume),
        )
        .with_state(state)
}
