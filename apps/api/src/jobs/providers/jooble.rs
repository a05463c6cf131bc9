//! Credentialed keyword search. The API key travels in the URL path; the query in a POST body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{or_default, send_json, JobProvider, ProviderError, ProviderSettings};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://jooble.org";
const TIMEOUT: Duration = Duration::from_secs(15);
const KEYWORD_SKILLS: usize = 5;

#[derive(Debug, Serialize)]
struct JoobleRequest<'a> {
    keywords: String,
    /// Empty searches worldwide.
    location: &'a str,
    radius: &'a str,
    page: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoobleResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    jobs: Vec<JoobleItem>,
}

#[derive(Debug, Deserialize)]
struct JoobleItem {
    #[serde(default)]
    title: String,
    location: Option<String>,
    #[serde(default)]
    snippet: String,
    salary: Option<String>,
    source: Option<String>,
    #[serde(rename = "type")]
    job_type: Option<String>,
    #[serde(default)]
    link: String,
    company: Option<String>,
    updated: Option<String>,
}

impl From<JoobleItem> for Job {
    fn from(item: JoobleItem) -> Self {
        let source = item.source.unwrap_or_default();
        Job {
            title: item.title,
            company: or_default(item.company, &source),
            location: or_default(item.location, "Not specified"),
            description: sanitize_description(&item.snippet),
            salary: item.salary.unwrap_or_default(),
            job_url: item.link,
            posted_date: item.updated.unwrap_or_default(),
            job_type: or_default(item.job_type, "Full-time"),
        }
    }
}

pub struct JoobleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl JoobleProvider {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_base_url(client, settings, BASE_URL)
    }

    pub fn with_base_url(
        client: Client,
        settings: &ProviderSettings,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: settings.jooble_api_key.clone(),
        }
    }

    /// `{base}/api/{key}` with the key percent-encoded as a single path segment.
    fn endpoint(&self, api_key: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("api")
            .push(api_key);
        Ok(url)
    }
}

#[async_trait]
impl JobProvider for JoobleProvider {
    fn name(&self) -> &'static str {
        "Jooble"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let Some(api_key) = &self.api_key else {
            return Err(ProviderError::CredentialMissing {
                provider: self.name(),
            });
        };

        let body = JoobleRequest {
            keywords: skills
                .iter()
                .take(KEYWORD_SKILLS)
                .cloned()
                .collect::<Vec<_>>()
                .join(" "),
            location: "",
            radius: "100",
            page: "1",
        };
        let request = self
            .client
            .post(self.endpoint(api_key)?)
            .json(&body)
            .timeout(TIMEOUT);
        let response: JoobleResponse = send_json(request).await?;

        let total = response.total_count;
        let jobs: Vec<Job> = response
            .jobs
            .into_iter()
            .take(limit)
            .map(Job::from)
            .collect();

        if jobs.is_empty() {
            return Err(ProviderError::Empty);
        }
        debug!(
            provider = self.name(),
            jobs = jobs.len(),
            total_available = total,
            "Provider returned jobs"
        );
        Ok(jobs)
    }
}
