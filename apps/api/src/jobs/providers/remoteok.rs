//! Free, no-auth remote tech board. Returns the whole feed; skills are matched locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{
    format_salary, lowercase_skills, matches_any_skill, or_default, send_json, JobProvider,
    ProviderError, DEFAULT_TIMEOUT,
};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://remoteok.com";
const USER_AGENT: &str = "ResumeApi/1.0";

/// Every field is optional: the first element of the feed is a metadata
/// record without `position`, and listings omit fields freely.
#[derive(Debug, Deserialize)]
struct RemoteOkItem {
    position: Option<String>,
    company: Option<String>,
    location: Option<String>,
    description: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    url: Option<String>,
    date: Option<String>,
    tags: Option<Vec<String>>,
}

pub struct RemoteOkProvider {
    client: Client,
    base_url: String,
}

impl RemoteOkProvider {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), url)
        }
    }

    fn to_job(&self, item: RemoteOkItem, title: String) -> Job {
        Job {
            title,
            company: item.company.unwrap_or_default(),
            location: or_default(item.location, "Remote"),
            description: sanitize_description(item.description.as_deref().unwrap_or_default()),
            salary: format_salary(item.salary_min, item.salary_max),
            job_url: item
                .url
                .as_deref()
                .map(|u| self.absolute_url(u))
                .unwrap_or_default(),
            posted_date: item.date.unwrap_or_default(),
            job_type: "Remote".to_string(),
        }
    }
}

#[async_trait]
impl JobProvider for RemoteOkProvider {
    fn name(&self) -> &'static str {
        "RemoteOK"
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/api", self.base_url))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(DEFAULT_TIMEOUT);
        let items: Vec<RemoteOkItem> = send_json(request).await?;

        let skills = lowercase_skills(skills);
        let mut jobs = Vec::with_capacity(limit);
        for mut item in items {
            if jobs.len() >= limit {
                break;
            }
            let Some(title) = item.position.take() else {
                continue;
            };
            let tags = item.tags.take().unwrap_or_default();
            let description = item.description.as_deref().unwrap_or_default();
            if !matches_any_skill(&skills, &[&title, description], &tags) {
                continue;
            }
            jobs.push(self.to_job(item, title));
        }

        if jobs.is_empty() {
            return Err(ProviderError::Empty);
        }
        debug!(provider = self.name(), jobs = jobs.len(), "Provider returned jobs");
        Ok(jobs)
    }
}
