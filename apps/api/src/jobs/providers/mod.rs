//! Provider adapters, one per external job-listing source.
//!
//! Every adapter maps `(skills, limit)` to normalized `Job`s through the
//! `JobProvider` trait. Credentials arrive through `ProviderSettings` at
//! construction; adapters never read the environment themselves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::jobs::models::Job;

pub mod adzuna;
pub mod arbeitnow;
pub mod findwork;
pub mod jooble;
pub mod jsearch;
pub mod remoteok;
pub mod themuse;

/// Per-call timeout used by most providers.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Provider-scoped failures. None of these reach the aggregator's caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} credentials not available")]
    CredentialMissing { provider: &'static str },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code: {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("no matching jobs found")]
    Empty,

    #[error("overall fetch deadline exceeded")]
    DeadlineExceeded,

    #[error("provider task failed: {0}")]
    TaskFailed(String),
}

impl ProviderError {
    /// True when the adapter skipped the call because it is not configured.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::CredentialMissing { .. })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A single external job source. Implementations must never return more than
/// `limit` jobs and must report an empty result as `ProviderError::Empty`.
#[async_trait]
pub trait JobProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// False when required credentials are absent. Such a provider still
    /// answers `fetch`, immediately, with `CredentialMissing`.
    fn is_available(&self) -> bool {
        true
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Credentials and per-provider options, injected at adapter construction.
/// A `None` credential means the provider is unavailable.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_country: String,
    pub jooble_api_key: Option<String>,
    pub rapidapi_key: Option<String>,
    pub findwork_token: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Sends the request and decodes a JSON body. Non-2xx is a `Status` error.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Lowercases skills once for client-side matching.
pub(crate) fn lowercase_skills(skills: &[String]) -> Vec<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// True if any skill is a case-insensitive substring of any field or tag.
/// `skills` must already be lowercase.
pub(crate) fn matches_any_skill(skills: &[String], fields: &[&str], tags: &[String]) -> bool {
    let haystacks: Vec<String> = fields
        .iter()
        .map(|f| f.to_lowercase())
        .chain(tags.iter().map(|t| t.to_lowercase()))
        .collect();
    skills
        .iter()
        .any(|skill| haystacks.iter().any(|h| h.contains(skill.as_str())))
}

/// Case-insensitive exact membership.
pub(crate) fn contains_skill(skills: &[String], wanted: &str) -> bool {
    skills.iter().any(|s| s.eq_ignore_ascii_case(wanted))
}

/// Formats a salary range, or returns an empty string when neither bound is positive.
pub(crate) fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    let min = min.filter(|v| *v > 0.0);
    let max = max.filter(|v| *v > 0.0);
    match (min, max) {
        (Some(lo), Some(hi)) => format!("${lo:.0} - ${hi:.0}"),
        (Some(lo), None) => format!("From ${lo:.0}"),
        (None, Some(hi)) => format!("Up to ${hi:.0}"),
        (None, None) => String::new(),
    }
}

/// Treats `None` and blank strings alike, falling back to `default`.
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Converts unix seconds to `YYYY-MM-DD`, empty when out of range.
pub(crate) fn unix_to_date(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let s = lowercase_skills(&skills(&["Rust"]));
        assert!(matches_any_skill(&s, &["Senior RUST Engineer", ""], &[]));
    }

    #[test]
    fn test_matches_substring_in_description() {
        let s = lowercase_skills(&skills(&["kube"]));
        assert!(matches_any_skill(&s, &["DevOps", "We run Kubernetes"], &[]));
    }

    #[test]
    fn test_matches_tags() {
        let s = lowercase_skills(&skills(&["python", "go"]));
        assert!(matches_any_skill(&s, &["Engineer", "Backend work"], &skills(&["GOLANG"])));
    }

    #[test]
    fn test_no_match() {
        let s = lowercase_skills(&skills(&["haskell"]));
        assert!(!matches_any_skill(&s, &["Java Dev", "Spring"], &skills(&["jvm"])));
    }

    #[test]
    fn test_empty_skills_never_match() {
        assert!(!matches_any_skill(&[], &["anything"], &[]));
    }

    #[test]
    fn test_contains_skill_is_exact_membership() {
        let s = skills(&["React", "nodejs"]);
        assert!(contains_skill(&s, "react"));
        assert!(!contains_skill(&s, "node"));
    }

    #[test]
    fn test_format_salary_variants() {
        assert_eq!(format_salary(Some(50000.0), Some(70000.4)), "$50000 - $70000");
        assert_eq!(format_salary(Some(50000.0), None), "From $50000");
        assert_eq!(format_salary(Some(0.0), Some(90000.0)), "Up to $90000");
        assert_eq!(format_salary(None, None), "");
    }

    #[test]
    fn test_or_default_treats_blank_as_missing() {
        assert_eq!(or_default(Some("  ".into()), "Remote"), "Remote");
        assert_eq!(or_default(None, "Remote"), "Remote");
        assert_eq!(or_default(Some("Berlin".into()), "Remote"), "Berlin");
    }

    #[test]
    fn test_unix_to_date() {
        assert_eq!(unix_to_date(1_700_000_000), "2023-11-14");
    }

    #[test]
    fn test_credential_missing_is_unavailable() {
        assert!(ProviderError::CredentialMissing { provider: "x" }.is_unavailable());
        assert!(!ProviderError::Empty.is_unavailable());
    }
}
