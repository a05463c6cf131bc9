//! Credentialed salary-range search. Needs both an app id and an app key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{
    format_salary, send_json, JobProvider, ProviderError, ProviderSettings, DEFAULT_TIMEOUT,
};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://api.adzuna.com";
const MAX_QUERY_CHARS: usize = 200;
const FALLBACK_QUERY_SKILLS: usize = 5;

#[derive(Debug, Clone)]
pub struct AdzunaCredentials {
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    #[serde(default)]
    results: Vec<AdzunaItem>,
}

#[derive(Debug, Deserialize)]
struct AdzunaItem {
    #[serde(default)]
    title: String,
    company: Option<DisplayName>,
    location: Option<DisplayName>,
    #[serde(default)]
    description: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    #[serde(default)]
    redirect_url: String,
    created: Option<DateTime<Utc>>,
    contract_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    #[serde(default)]
    display_name: String,
}

impl From<AdzunaItem> for Job {
    fn from(item: AdzunaItem) -> Self {
        Job {
            title: item.title,
            company: item.company.map(|c| c.display_name).unwrap_or_default(),
            location: item.location.map(|l| l.display_name).unwrap_or_default(),
            description: sanitize_description(&item.description),
            salary: format_salary(item.salary_min, item.salary_max),
            job_url: item.redirect_url,
            posted_date: item
                .created
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            job_type: item.contract_type.unwrap_or_default(),
        }
    }
}

/// Joins skills with ` OR `, falling back to the first five when the query is too long.
fn build_query(skills: &[String]) -> String {
    let query = skills.join(" OR ");
    if query.chars().count() > MAX_QUERY_CHARS {
        skills
            .iter()
            .take(FALLBACK_QUERY_SKILLS)
            .cloned()
            .collect::<Vec<_>>()
            .join(" OR ")
    } else {
        query
    }
}

pub struct AdzunaProvider {
    client: Client,
    base_url: String,
    country: String,
    credentials: Option<AdzunaCredentials>,
}

impl AdzunaProvider {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_base_url(client, settings, BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        settings: &ProviderSettings,
        base_url: impl Into<String>,
    ) -> Self {
        let credentials = match (&settings.adzuna_app_id, &settings.adzuna_app_key) {
            (Some(app_id), Some(app_key)) => Some(AdzunaCredentials {
                app_id: app_id.clone(),
                app_key: app_key.clone(),
            }),
            _ => None,
        };
        let country = if settings.adzuna_country.is_empty() {
            "us".to_string()
        } else {
            settings.adzuna_country.clone()
        };
        Self {
            client,
            base_url: base_url.into(),
            country,
            credentials,
        }
    }
}

#[async_trait]
impl JobProvider for AdzunaProvider {
    fn name(&self) -> &'static str {
        "Adzuna"
    }

    fn is_available(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let Some(credentials) = &self.credentials else {
            return Err(ProviderError::CredentialMissing {
                provider: self.name(),
            });
        };

        let results_per_page = limit.to_string();
        let what = build_query(skills);
        let request = self
            .client
            .get(format!(
                "{}/v1/api/jobs/{}/search/1",
                self.base_url, self.country
            ))
            .query(&[
                ("app_id", credentials.app_id.as_str()),
                ("app_key", credentials.app_key.as_str()),
                ("results_per_page", results_per_page.as_str()),
                ("what", what.as_str()),
                ("content-type", "application/json"),
            ])
            .timeout(DEFAULT_TIMEOUT);
        let response: AdzunaResponse = send_json(request).await?;

        let jobs: Vec<Job> = response
            .results
            .into_iter()
            .take(limit)
            .map(Job::from)
            .collect();

        if jobs.is_empty() {
            return Err(ProviderError::Empty);
        }
        debug!(provider = self.name(), jobs = jobs.len(), "Provider returned jobs");
        Ok(jobs)
    }
}
