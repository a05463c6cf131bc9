//! Free, no-auth EU/US job board. The feed is unfiltered; skills are matched locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{
    lowercase_skills, matches_any_skill, send_json, unix_to_date, JobProvider, ProviderError,
    DEFAULT_TIMEOUT,
};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://www.arbeitnow.com";

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowItem>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    url: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    job_types: Vec<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    created_at: i64,
}

impl From<ArbeitnowItem> for Job {
    fn from(item: ArbeitnowItem) -> Self {
        Job {
            location: if item.remote {
                "Remote".to_string()
            } else {
                item.location
            },
            job_type: item
                .job_types
                .into_iter()
                .next()
                .unwrap_or_else(|| "Full-time".to_string()),
            description: sanitize_description(&item.description),
            posted_date: unix_to_date(item.created_at),
            title: item.title,
            company: item.company_name,
            salary: String::new(),
            job_url: item.url,
        }
    }
}

pub struct ArbeitnowProvider {
    client: Client,
    base_url: String,
}

impl ArbeitnowProvider {
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
impl JobProvider for ArbeitnowProvider {
    fn name(&self) -> &'static str {
        "Arbeitnow"
    }

    async fn fetch(&self, skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/api/job-board-api", self.base_url))
            .timeout(DEFAULT_TIMEOUT);
        let response: ArbeitnowResponse = send_json(request).await?;

        let skills = lowercase_skills(skills);
        let jobs: Vec<Job> = response
            .data
            .into_iter()
            .filter(|item| matches_any_skill(&skills, &[&item.title, &item.description], &item.tags))
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

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_maps_remote_and_job_types() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/job-board-api");
                then.status(200).json_body(json!({
                    "data": [
                        {
                            "title": "Backend Developer",
                            "company_name": "Berlin GmbH",
                            "description": "<b>Django</b> &amp; Postgres",
                            "remote": true,
                            "url": "https://arbeitnow.com/view/1",
                            "tags": ["python"],
                            "job_types": ["Contract", "Part-time"],
                            "location": "Berlin",
                            "created_at": 1700000000
                        },
                        {
                            "title": "Sales Manager",
                            "company_name": "Verkauf AG",
                            "description": "B2B",
                            "remote": false,
                            "url": "https://arbeitnow.com/view/2",
                            "tags": [],
                            "job_types": [],
                            "location": "Munich",
                            "created_at": 1700000000
                        },
                        {
                            "title": "Data Engineer (Python)",
                            "company_name": "Hamburg Data",
                            "description": "ETL",
                            "remote": false,
                            "url": "https://arbeitnow.com/view/3",
                            "location": "Hamburg",
                            "created_at": 1700000000
                        }
                    ]
                }));
            })
            .await;

        let provider = ArbeitnowProvider::with_base_url(Client::new(), server.base_url());
        let jobs = provider.fetch(&skills(&["Python"]), 5).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].location, "Remote");
        assert_eq!(jobs[0].job_type, "Contract");
        assert_eq!(jobs[0].description, "Django & Postgres");
        assert_eq!(jobs[0].posted_date, "2023-11-14");
        assert_eq!(jobs[1].location, "Hamburg");
        assert_eq!(jobs[1].job_type, "Full-time");
    }

    #[tokio::test]
    async fn test_empty_feed_is_empty_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/job-board-api");
                then.status(200).json_body(json!({ "data": [] }));
            })
            .await;

        let provider = ArbeitnowProvider::with_base_url(Client::new(), server.base_url());
        let err = provider.fetch(&skills(&["rust"]), 5).await.unwrap_err();
        assert!(matches!(err, ProviderError::Empty));
    }
}
