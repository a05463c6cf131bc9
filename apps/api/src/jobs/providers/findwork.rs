//! Free tech board. Listings are keyword-filtered locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{
    lowercase_skills, matches_any_skill, send_json, JobProvider, ProviderError, ProviderSettings,
    DEFAULT_TIMEOUT,
};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://findwork.dev";
const DEFAULT_TOKEN: &str = "test-token";

#[derive(Debug, Deserialize)]
struct FindworkResponse {
    #[serde(default)]
    results: Vec<FindworkItem>,
}

#[derive(Debug, Deserialize)]
struct FindworkItem {
    #[serde(default)]
    role: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    text: String,
    #[serde(default)]
    url: String,
    employment_type: Option<String>,
    date_posted: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<FindworkItem> for Job {
    fn from(item: FindworkItem) -> Self {
        Job {
            location: if item.remote {
                "Remote".to_string()
            } else {
                item.location.unwrap_or_default()
            },
            description: sanitize_description(&item.text),
            title: item.role,
            company: item.company_name,
            salary: String::new(),
            job_url: item.url,
            posted_date: item.date_posted.unwrap_or_default(),
            job_type: item.employment_type.unwrap_or_default(),
        }
    }
}

pub struct FindworkProvider {
    client: Client,
    base_url: String,
    token: String,
}

impl FindworkProvider {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_base_url(client, settings, BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        settings: &ProviderSettings,
        base_url: impl Into<String>,
    ) -> Self {
        let token = if settings.findwork_token.is_empty() {
            DEFAULT_TOKEN.to_string()
        } else {
            settings.findwork_token.clone()
        };
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait]
impl JobProvider for FindworkProvider {
    fn name(&self) -> &'static str {
        "Findwork"
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/api/jobs/", self.base_url))
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .timeout(DEFAULT_TIMEOUT);
        let response: FindworkResponse = send_json(request).await?;

        let skills = lowercase_skills(skills);
        let jobs: Vec<Job> = response
            .results
            .into_iter()
            .filter(|item| matches_any_skill(&skills, &[&item.role, &item.text], &item.keywords))
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
