//! Job aggregation across tiered providers.
//!
//! Flow: tier 1 in parallel → (tier 2 for the remaining quota if tier 1 fell
//! short) → dedupe → synthetic fallback if nothing real came back. The caller
//! always gets a non-empty, limit-bounded list.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::jobs::dedup::dedupe;
use crate::jobs::executor::run_tier;
use crate::jobs::fallback;
use crate::jobs::models::{AggregationRequest, Job};
use crate::jobs::providers::{
    adzuna::AdzunaProvider, arbeitnow::ArbeitnowProvider, findwork::FindworkProvider,
    jooble::JoobleProvider, jsearch::JSearchProvider, remoteok::RemoteOkProvider,
    themuse::TheMuseProvider, JobProvider, ProviderSettings,
};

/// Overall budget for one fetch when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(25);

/// Where the returned listings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Providers,
    Fallback,
}

/// Summary of one aggregation run, returned alongside the listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    /// Effective (clamped) limit.
    pub limit: usize,
    pub tier1_jobs: usize,
    pub tier2_ran: bool,
    pub tier2_jobs: usize,
    pub returned: usize,
    pub source: ResultSource,
}

pub struct JobAggregator {
    tier1: Vec<Arc<dyn JobProvider>>,
    tier2: Vec<Arc<dyn JobProvider>>,
    deadline: Duration,
}

impl JobAggregator {
    pub fn new(
        tier1: Vec<Arc<dyn JobProvider>>,
        tier2: Vec<Arc<dyn JobProvider>>,
        deadline: Duration,
    ) -> Self {
        Self {
            tier1,
            tier2,
            deadline,
        }
    }

    /// Wires the production providers. Credentialed ones are always registered
    /// and report themselves unavailable when their keys are missing.
    pub fn from_settings(client: Client, settings: &ProviderSettings, deadline: Duration) -> Self {
        let tier1: Vec<Arc<dyn JobProvider>> = vec![
            Arc::new(RemoteOkProvider::new(client.clone())),
            Arc::new(ArbeitnowProvider::new(client.clone())),
            Arc::new(TheMuseProvider::new(client.clone())),
            Arc::new(AdzunaProvider::new(client.clone(), settings)),
        ];
        let tier2: Vec<Arc<dyn JobProvider>> = vec![
            Arc::new(FindworkProvider::new(client.clone(), settings)),
            Arc::new(JoobleProvider::new(client.clone(), settings)),
            Arc::new(JSearchProvider::new(client, settings)),
        ];

        for (tier, providers) in [("tier1", &tier1), ("tier2", &tier2)] {
            for provider in providers {
                info!(
                    tier,
                    provider = provider.name(),
                    available = provider.is_available(),
                    "Registered job provider"
                );
            }
        }

        Self::new(tier1, tier2, deadline)
    }

    /// Returns up to `limit` unique listings for `skills`. Never empty.
    pub async fn fetch<S: AsRef<str>>(&self, skills: &[S], limit: i64) -> Vec<Job> {
        self.fetch_with_report(skills, limit).await.0
    }

    pub async fn fetch_with_report<S: AsRef<str>>(
        &self,
        skills: &[S],
        limit: i64,
    ) -> (Vec<Job>, AggregationReport) {
        let request = AggregationRequest::new(skills, limit);
        let limit = request.limit;
        let deadline = Instant::now() + self.deadline;
        let shared: Arc<[String]> = request.skills.clone().into();

        info!(skills = ?request.skills, limit, "Fetching job recommendations");

        let tier1 = run_tier("tier1", &self.tier1, Arc::clone(&shared), limit, deadline).await;
        let tier1_jobs = tier1.total();
        let mut collected = tier1.jobs;

        let mut tier2_ran = false;
        let mut tier2_jobs = 0;
        if tier1_jobs >= limit {
            info!(tier1_jobs, limit, "Tier 1 sufficient, skipping tier 2");
        } else if Instant::now() >= deadline {
            warn!(tier1_jobs, limit, "Deadline reached after tier 1, skipping tier 2");
        } else {
            let remaining = (limit - tier1_jobs).max(1);
            info!(tier1_jobs, remaining, "Tier 1 insufficient, running tier 2");
            let tier2 = run_tier("tier2", &self.tier2, shared, remaining, deadline).await;
            tier2_ran = true;
            tier2_jobs = tier2.total();
            collected.extend(tier2.jobs);
        }

        let mut jobs = dedupe(collected, limit);
        let source = if jobs.is_empty() {
            warn!("No provider returned jobs, using fallback listings");
            jobs = fallback::generate(&request.skills, limit, Utc::now().date_naive());
            ResultSource::Fallback
        } else {
            ResultSource::Providers
        };

        let report = AggregationReport {
            limit,
            tier1_jobs,
            tier2_ran,
            tier2_jobs,
            returned: jobs.len(),
            source,
        };
        info!(
            returned = report.returned,
            source = ?report.source,
            tier2_ran,
            "Job aggregation complete"
        );
        (jobs, report)
    }
}
