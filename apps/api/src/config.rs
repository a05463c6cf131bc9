use std::time::Duration;

use anyhow::{Context, Result};

use crate::jobs::aggregator::DEFAULT_DEADLINE;
use crate::jobs::providers::ProviderSettings;

const DEFAULT_ANALYZER_URL: &str = "http://localhost:8000/analyze";

/// Application configuration loaded from environment variables.
/// Every variable is optional; provider credentials left unset disable that provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analyzer_url: String,
    pub providers: ProviderSettings,
    /// Overall budget for one job fetch across both tiers.
    pub job_fetch_deadline: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = optional_env("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let job_fetch_deadline = match optional_env("JOB_FETCH_DEADLINE_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse::<u64>()
                    .context("JOB_FETCH_DEADLINE_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_DEADLINE,
        };

        Ok(Config {
            port,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            analyzer_url: optional_env("ANALYZER_URL")
                .unwrap_or_else(|| DEFAULT_ANALYZER_URL.to_string()),
            providers: ProviderSettings {
                adzuna_app_id: optional_env("ADZUNA_APP_ID"),
                adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
                adzuna_country: optional_env("JOB_COUNTRY").unwrap_or_else(|| "us".to_string()),
                jooble_api_key: optional_env("JOOBLE_API_KEY"),
                rapidapi_key: optional_env("RAPIDAPI_KEY"),
                findwork_token: optional_env("FINDWORK_API_TOKEN")
                    .unwrap_or_else(|| "test-token".to_string()),
            },
            job_fetch_deadline,
        })
    }
}
