//! Client for the resume analysis service.
//!
//! The analyzer is an external HTTP collaborator that scores a resume and
//! extracts its skills. Everything goes through the [`ResumeAnalyzer`] trait so
//! handlers can be tested without a live service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

/// Resume text beyond this many characters is cut before analysis.
pub const MAX_RESUME_CHARS: usize = 50_000;
const ANALYZER_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analyzer error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    /// Returns the analyzer's JSON verdict for `resume_text`.
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Value, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    job_description: &'a str,
}

#[derive(Clone)]
pub struct HttpResumeAnalyzer {
    client: Client,
    url: String,
}

impl HttpResumeAnalyzer {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for HttpResumeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Value, AnalysisError> {
        let text = bound_text(resume_text, MAX_RESUME_CHARS);
        debug!(
            url = %self.url,
            chars = text.chars().count(),
            with_job_description = job_description.is_some(),
            "Calling resume analyzer"
        );

        let response = self
            .client
            .post(&self.url)
            .timeout(ANALYZER_TIMEOUT)
            .json(&AnalyzeRequest {
                text,
                job_description: job_description.unwrap_or_default(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Analyzer returned non-success status");
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Truncates `text` to at most `max_chars` characters on a char boundary.
pub fn bound_text(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Reads the `skills` array of an analysis. Non-string entries are ignored;
/// a missing or malformed field yields no skills.
pub fn extract_skills(analysis: &Value) -> Vec<String> {
    analysis
        .get("skills")
        .and_then(Value::as_array)
        .map(|skills| {
            skills
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
