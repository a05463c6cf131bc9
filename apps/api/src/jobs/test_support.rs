//! In-memory providers for executor and aggregator tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::jobs::models::Job;
use crate::jobs::providers::{JobProvider, ProviderError};

pub fn job(title: &str, company: &str) -> Job {
    Job {
        title: title.to_string(),
        company: company.to_string(),
        location: "Remote".to_string(),
        description: format!("{title} at {company}"),
        salary: String::new(),
        job_url: format!("https://jobs.example/{title}"),
        posted_date: "2024-03-01".to_string(),
        job_type: "Full-time".to_string(),
    }
}

enum Behaviour {
    Jobs(Vec<Job>),
    Fail,
    Unavailable,
}

pub struct FakeProvider {
    name: &'static str,
    behaviour: Behaviour,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completions: AtomicUsize,
    last_limit: Mutex<Option<usize>>,
}

impl FakeProvider {
    fn build(name: &'static str, behaviour: Behaviour, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            name,
            behaviour,
            delay,
            calls: AtomicUsize::new(0),
            completions: AtomicUsize::new(0),
            last_limit: Mutex::new(None),
        })
    }

    pub fn returning(name: &'static str, jobs: Vec<Job>) -> Arc<Self> {
        Self::build(name, Behaviour::Jobs(jobs), None)
    }

    pub fn slow(name: &'static str, jobs: Vec<Job>, delay: Duration) -> Arc<Self> {
        Self::build(name, Behaviour::Jobs(jobs), Some(delay))
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Self::build(name, Behaviour::Fail, None)
    }

    pub fn unavailable(name: &'static str) -> Arc<Self> {
        Self::build(name, Behaviour::Unavailable, None)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that ran to the end, past any configured delay.
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }

    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl JobProvider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        !matches!(self.behaviour, Behaviour::Unavailable)
    }

    async fn fetch(&self, _skills: &[String], limit: usize) -> Result<Vec<Job>, ProviderError> {
        if let Behaviour::Unavailable = self.behaviour {
            return Err(ProviderError::CredentialMissing { provider: self.name });
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.lock().unwrap() = Some(limit);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completions.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Jobs(jobs) if !jobs.is_empty() => {
                Ok(jobs.iter().take(limit).cloned().collect())
            }
            _ => Err(ProviderError::Empty),
        }
    }
}
