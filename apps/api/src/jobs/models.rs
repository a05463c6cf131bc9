use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Limit used whenever the requested count is out of range.
pub const DEFAULT_LIMIT: usize = 5;
/// Largest number of listings a single fetch may return.
pub const MAX_LIMIT: usize = 10;

/// A normalized job listing. Field names are stable for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Sanitized, at most 200 characters plus an ellipsis.
    pub description: String,
    /// Free text, empty when the provider has no salary data.
    pub salary: String,
    pub job_url: String,
    pub posted_date: String,
    pub job_type: String,
}

impl Job {
    /// Case-insensitive (title, company) identity used for deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.company.to_lowercase())
    }
}

/// A normalized aggregation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRequest {
    /// Ordered set of skill keywords; earlier entries have higher query priority.
    pub skills: Vec<String>,
    /// Effective limit, always within `1..=MAX_LIMIT`.
    pub limit: usize,
}

impl AggregationRequest {
    pub fn new<S: AsRef<str>>(skills: &[S], limit: i64) -> Self {
        Self {
            skills: normalize_skills(skills),
            limit: effective_limit(limit),
        }
    }
}

/// Clamps a requested limit. Anything outside `1..=MAX_LIMIT` becomes `DEFAULT_LIMIT`.
pub fn effective_limit(requested: i64) -> usize {
    if (1..=MAX_LIMIT as i64).contains(&requested) {
        requested as usize
    } else {
        DEFAULT_LIMIT
    }
}

/// Trims skills, drops blanks and removes case-insensitive repeats, keeping first-seen order.
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit_clamps_out_of_range_to_default() {
        assert_eq!(effective_limit(0), 5);
        assert_eq!(effective_limit(-3), 5);
        assert_eq!(effective_limit(50), 5);
        assert_eq!(effective_limit(11), 5);
    }

    #[test]
    fn test_effective_limit_keeps_in_range_values() {
        assert_eq!(effective_limit(1), 1);
        assert_eq!(effective_limit(3), 3);
        assert_eq!(effective_limit(10), 10);
    }

    #[test]
    fn test_normalize_skills_dedupes_case_insensitively_in_order() {
        let skills = normalize_skills(&[" Python ", "django", "", "PYTHON", "  ", "Rust"]);
        assert_eq!(skills, vec!["Python", "django", "Rust"]);
    }

    #[test]
    fn test_dedup_key_ignores_case() {
        let a = Job {
            title: "Rust Engineer".into(),
            company: "Acme".into(),
            location: String::new(),
            description: String::new(),
            salary: String::new(),
            job_url: String::new(),
            posted_date: String::new(),
            job_type: String::new(),
        };
        let mut b = a.clone();
        b.title = "RUST engineer".into();
        b.company = "ACME".into();
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_job_serializes_with_stable_field_names() {
        let job = Job {
            title: "t".into(),
            company: "c".into(),
            location: "l".into(),
            description: "d".into(),
            salary: String::new(),
            job_url: "u".into(),
            posted_date: "2024-01-01".into(),
            job_type: "Full-time".into(),
        };
        let value = serde_json::to_value(&job).unwrap();
        for field in [
            "title",
            "company",
            "location",
            "description",
            "salary",
            "job_url",
            "posted_date",
            "job_type",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
