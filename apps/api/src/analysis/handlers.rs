//! Axum route handlers for the resume analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analysis::extract_skills;
use crate::errors::AppError;
use crate::jobs::models::{normalize_skills, Job};
use crate::state::AppState;

/// Number of listings recommended alongside an analysis.
pub const RECOMMENDATION_LIMIT: i64 = 8;

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub analysis: Value,
    pub recommended_jobs: Vec<Job>,
}

/// POST /api/v1/resumes/analyze
///
/// Runs the analyzer over the resume text, then recommends jobs for the
/// skills it found. No skills means no recommendations, not an error.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let job_description = request
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty());
    let analysis = state
        .analyzer
        .analyze(&request.resume_text, job_description)
        .await?;

    let skills = normalize_skills(&extract_skills(&analysis));
    let recommended_jobs = if skills.is_empty() {
        info!("Analysis returned no skills, skipping job recommendations");
        Vec::new()
    } else {
        state
            .aggregator
            .fetch(&skills, RECOMMENDATION_LIMIT)
            .await
    };

    Ok(Json(AnalyzeResumeResponse {
        analysis,
        recommended_jobs,
    }))
}
