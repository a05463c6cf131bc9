//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::jobs::aggregator::AggregationReport;
use crate::jobs::models::{Job, DEFAULT_LIMIT};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    /// Kept loose so that fractions, strings or oversized numbers fall back
    /// to the default limit instead of failing extraction.
    #[serde(default)]
    pub limit: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub jobs: Vec<Job>,
    pub report: AggregationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/recommendations
///
/// Aggregates listings for the given skills. Out-of-range limits fall back to 5;
/// the response is never empty thanks to synthetic listings.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    if request.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "skills must contain at least one non-blank entry".to_string(),
        ));
    }

    let limit = requested_limit(request.limit.as_ref());
    let (jobs, report) = state
        .aggregator
        .fetch_with_report(&request.skills, limit)
        .await;

    Ok(Json(RecommendationsResponse { jobs, report }))
}

/// Integer limits pass through to clamping; anything else means the default.
fn requested_limit(limit: Option<&Value>) -> i64 {
    limit
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_LIMIT as i64)
}
