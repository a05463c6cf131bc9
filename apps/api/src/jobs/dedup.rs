use std::collections::HashSet;

use tracing::debug;

use crate::jobs::models::Job;

/// Keeps the first listing for each case-insensitive (title, company) key, in
/// arrival order, and stops as soon as `limit` unique listings are collected.
pub fn dedupe(jobs: Vec<Job>, limit: usize) -> Vec<Job> {
    let total = jobs.len();
    let mut seen = HashSet::with_capacity(limit);
    let mut unique = Vec::with_capacity(limit.min(total));

    for job in jobs {
        if unique.len() >= limit {
            break;
        }
        if seen.insert(job.dedup_key()) {
            unique.push(job);
        }
    }

    debug!(input = total, unique = unique.len(), "Deduplicated job listings");
    unique
}
