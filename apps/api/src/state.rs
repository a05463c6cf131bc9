use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::jobs::aggregator::JobAggregator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<JobAggregator>,
    /// Pluggable analyzer. Default: HttpResumeAnalyzer pointed at ANALYZER_URL.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}
