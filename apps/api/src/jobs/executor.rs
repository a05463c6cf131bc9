//! Tiered parallel executor. Runs one tier of providers as a structured task group.
//!
//! Every provider is spawned as its own task. The tier waits for all of them
//! (or for the shared deadline), then concatenates successful results in
//! launch order. Tasks still running at the deadline, or when the caller
//! drops the tier future, are aborted, which drops their in-flight request.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::jobs::models::Job;
use crate::jobs::providers::{JobProvider, ProviderError};

/// Result of running one tier.
#[derive(Debug, Default)]
pub struct TierOutcome {
    /// Successful providers' jobs, concatenated in launch order.
    pub jobs: Vec<Job>,
    pub succeeded: usize,
    /// Includes unavailable providers and empty results.
    pub failed: usize,
    /// Providers skipped for missing credentials (a subset of `failed`).
    pub unavailable: usize,
}

impl TierOutcome {
    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    /// Providers that actually made a call.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed - self.unavailable
    }
}

/// Runs every provider in `providers` concurrently and joins on all of them.
pub async fn run_tier(
    tier: &'static str,
    providers: &[Arc<dyn JobProvider>],
    skills: Arc<[String]>,
    limit: usize,
    deadline: Instant,
) -> TierOutcome {
    debug!(tier, providers = providers.len(), limit, "Launching tier");

    // Tasks live in a JoinSet so that dropping this future (caller cancellation)
    // aborts every provider call still in flight.
    let mut set = JoinSet::new();
    for (index, provider) in providers.iter().enumerate() {
        let provider = Arc::clone(provider);
        let skills = Arc::clone(&skills);
        set.spawn(async move { (index, provider.fetch(&skills, limit).await) });
    }

    let mut slots: Vec<Option<Result<Vec<Job>, ProviderError>>> =
        providers.iter().map(|_| None).collect();
    let mut timed_out = false;
    loop {
        match tokio::time::timeout_at(deadline, set.join_next()).await {
            Ok(Some(Ok((index, result)))) => slots[index] = Some(result),
            Ok(Some(Err(join_error))) => {
                warn!(tier, error = %join_error, "Provider task failed");
            }
            Ok(None) => break,
            Err(_) => {
                set.abort_all();
                timed_out = true;
                break;
            }
        }
    }

    let results: Vec<(&'static str, Result<Vec<Job>, ProviderError>)> = providers
        .iter()
        .zip(slots)
        .map(|(provider, slot)| {
            let result = slot.unwrap_or_else(|| {
                Err(if timed_out {
                    ProviderError::DeadlineExceeded
                } else {
                    ProviderError::TaskFailed("task panicked or was cancelled".to_string())
                })
            });
            (provider.name(), result)
        })
        .collect();

    // Every task has finished or been aborted; only now is the outcome assembled.
    let mut outcome = TierOutcome::default();
    for (provider, result) in results {
        match result {
            Ok(jobs) if !jobs.is_empty() => {
                debug!(tier, provider, jobs = jobs.len(), "Provider succeeded");
                outcome.succeeded += 1;
                outcome.jobs.extend(jobs);
            }
            Ok(_) => {
                warn!(tier, provider, "Provider returned no jobs");
                outcome.failed += 1;
            }
            Err(e) if e.is_unavailable() => {
                debug!(tier, provider, "Provider not configured, skipped");
                outcome.failed += 1;
                outcome.unavailable += 1;
            }
            Err(e) => {
                warn!(tier, provider, error = %e, "Provider failed");
                outcome.failed += 1;
            }
        }
    }

    info!(
        tier,
        attempted = outcome.attempted(),
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        unavailable = outcome.unavailable,
        jobs = outcome.total(),
        "Tier complete"
    );
    outcome
}
