//! Free, no-auth curated board. Skills only pick the category to query.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{contains_skill, send_json, JobProvider, ProviderError, DEFAULT_TIMEOUT};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://www.themuse.com";

#[derive(Debug, Deserialize)]
struct MuseResponse {
    #[serde(default)]
    results: Vec<MuseItem>,
}

#[derive(Debug, Deserialize)]
struct MuseItem {
    #[serde(default)]
    name: String,
    company: Option<MuseNamed>,
    #[serde(default)]
    locations: Vec<MuseNamed>,
    #[serde(default)]
    contents: String,
    #[serde(default)]
    publication_date: String,
    refs: Option<MuseRefs>,
}

#[derive(Debug, Deserialize)]
struct MuseNamed {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct MuseRefs {
    #[serde(default)]
    landing_page: String,
}

impl From<MuseItem> for Job {
    fn from(item: MuseItem) -> Self {
        Job {
            title: item.name,
            company: item.company.map(|c| c.name).unwrap_or_default(),
            location: item
                .locations
                .into_iter()
                .next()
                .map(|l| l.name)
                .unwrap_or_else(|| "Remote".to_string()),
            description: sanitize_description(&item.contents),
            salary: String::new(),
            job_url: item.refs.map(|r| r.landing_page).unwrap_or_default(),
            posted_date: item.publication_date,
            job_type: "Full-time".to_string(),
        }
    }
}

/// Routes a skill set to a board category, if any.
fn category_for(skills: &[String]) -> Option<&'static str> {
    if ["javascript", "react", "node"]
        .iter()
        .any(|s| contains_skill(skills, s))
    {
        Some("Software Engineering")
    } else if ["python", "java"].iter().any(|s| contains_skill(skills, s)) {
        Some("Data Science")
    } else {
        None
    }
}

pub struct TheMuseProvider {
    client: Client,
    base_url: String,
}

impl TheMuseProvider {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl JobProvider for TheMuseProvider {
    fn name(&self) -> &'static str {
        "TheMuse"
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let mut query = vec![("page", "0"), ("descending", "true"), ("api_key", "public")];
        if let Some(category) = category_for(skills) {
            query.push(("category", category));
        }

        let request = self
            .client
            .get(format!("{}/api/public/jobs", self.base_url))
            .query(&query)
            .timeout(DEFAULT_TIMEOUT);
        let response: MuseResponse = send_json(request).await?;

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
