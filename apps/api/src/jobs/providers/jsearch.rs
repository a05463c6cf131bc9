//! Credentialed developer-query search behind RapidAPI.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::jobs::models::Job;
use crate::jobs::providers::{
    format_salary, send_json, JobProvider, ProviderError, ProviderSettings, DEFAULT_TIMEOUT,
};
use crate::jobs::sanitize::sanitize_description;

const BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
const QUERY_SKILLS: usize = 3;

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Vec<JSearchItem>,
}

#[derive(Debug, Deserialize)]
struct JSearchItem {
    #[serde(default)]
    job_title: String,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_description: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_apply_link: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_employment_type: Option<String>,
}

impl From<JSearchItem> for Job {
    fn from(item: JSearchItem) -> Self {
        let city = item.job_city.unwrap_or_default();
        let location = match item.job_state.filter(|s| !s.is_empty()) {
            Some(state) if !city.is_empty() => format!("{city}, {state}"),
            Some(state) => state,
            None => city,
        };
        Job {
            title: item.job_title,
            company: item.employer_name.unwrap_or_default(),
            location,
            description: sanitize_description(item.job_description.as_deref().unwrap_or_default()),
            salary: match (item.job_min_salary, item.job_max_salary) {
                (Some(min), Some(max)) => format_salary(Some(min), Some(max)),
                _ => String::new(),
            },
            job_url: item.job_apply_link.unwrap_or_default(),
            posted_date: item.job_posted_at_datetime_utc.unwrap_or_default(),
            job_type: item.job_employment_type.unwrap_or_default(),
        }
    }
}

pub struct JSearchProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl JSearchProvider {
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
            api_key: settings.rapidapi_key.clone(),
        }
    }
}

#[async_trait]
impl JobProvider for JSearchProvider {
    fn name(&self) -> &'static str {
        "JSearch"
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

        let lead: Vec<&str> = skills.iter().take(QUERY_SKILLS).map(String::as_str).collect();
        let query = format!("{} developer", lead.join(" "));
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("query", query.as_str()), ("num_pages", "1")])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .timeout(DEFAULT_TIMEOUT);
        let response: JSearchResponse = send_json(request).await?;

        let jobs: Vec<Job> = response
            .data
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

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn configured() -> ProviderSettings {
        ProviderSettings {
            rapidapi_key: Some("rapid".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_sends_headers_and_developer_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("query", "rust go sql developer")
                    .query_param("num_pages", "1")
                    .header("X-RapidAPI-Key", "rapid")
                    .header("X-RapidAPI-Host", RAPIDAPI_HOST);
                then.status(200).json_body(json!({
                    "data": [
                        {
                            "job_title": "Rust Developer",
                            "employer_name": "Oxide",
                            "job_city": "Austin",
                            "job_state": "TX",
                            "job_description": "Write\n\nRust",
                            "job_min_salary": 100000,
                            "job_max_salary": 130000,
                            "job_apply_link": "https://apply/1",
                            "job_posted_at_datetime_utc": "2024-03-01T00:00:00.000Z",
                            "job_employment_type": "FULLTIME"
                        },
                        {
                            "job_title": "Go Developer",
                            "employer_name": "Gopher",
                            "job_city": "Denver",
                            "job_state": null,
                            "job_min_salary": 90000,
                            "job_max_salary": null
                        }
                    ]
                }));
            })
            .await;

        let provider = JSearchProvider::with_base_url(Client::new(), &configured(), server.base_url());
        let jobs = provider
            .fetch(&skills(&["rust", "go", "sql", "docker"]), 5)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].location, "Austin, TX");
        assert_eq!(jobs[0].salary, "$100000 - $130000");
        assert_eq!(jobs[0].description, "Write Rust");
        assert_eq!(jobs[1].location, "Denver");
        assert_eq!(jobs[1].salary, "");
    }

    #[tokio::test]
    async fn test_unavailable_without_key() {
        let provider = JSearchProvider::new(Client::new(), &ProviderSettings::default());
        assert!(!provider.is_available());
        let err = provider.fetch(&skills(&["rust"]), 5).await.unwrap_err();
        assert!(matches!(err, ProviderError::CredentialMissing { provider: "JSearch" }));
    }
}
