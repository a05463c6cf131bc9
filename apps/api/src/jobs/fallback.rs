//! Synthetic listings returned only when no provider produced a real result.

use chrono::{Duration, NaiveDate};

use crate::jobs::models::Job;

/// Number of skills that feed the templates.
const TOP_SKILLS: usize = 3;
/// Stand-ins used when the request carried no skills.
const GENERIC_TITLE_SKILL: &str = "Software";
const GENERIC_SKILL_PHRASE: &str = "modern programming languages";

struct Template {
    title: TitleShape,
    company: &'static str,
    location: &'static str,
    description: DescriptionShape,
    salary: &'static str,
    job_url: &'static str,
    days_ago: i64,
}

enum TitleShape {
    Prefixed(&'static str),
    Suffixed(&'static str),
    Fixed(&'static str),
}

enum DescriptionShape {
    AllSkills,
    LeadSkill,
    Fixed(&'static str),
}

const TEMPLATES: [Template; 5] = [
    Template {
        title: TitleShape::Prefixed("Senior"),
        company: "Tech Innovations Inc.",
        location: "Remote",
        description: DescriptionShape::AllSkills,
        salary: "$120,000 - $160,000",
        job_url: "https://www.linkedin.com/jobs/",
        days_ago: 2,
    },
    Template {
        title: TitleShape::Suffixed("Software Engineer"),
        company: "Global Solutions Ltd.",
        location: "New York, NY",
        description: DescriptionShape::LeadSkill,
        salary: "$100,000 - $140,000",
        job_url: "https://www.indeed.com/",
        days_ago: 3,
    },
    Template {
        title: TitleShape::Fixed("Full Stack Developer"),
        company: "StartUp Ventures",
        location: "San Francisco, CA",
        description: DescriptionShape::Fixed(
            "Build scalable applications using modern tech stack. Experience with our key technologies is a plus.",
        ),
        salary: "$110,000 - $150,000",
        job_url: "https://www.glassdoor.com/Job/",
        days_ago: 5,
    },
    Template {
        title: TitleShape::Prefixed("Mid-Level"),
        company: "Enterprise Corp",
        location: "Austin, TX",
        description: DescriptionShape::Fixed(
            "Growing team seeking talented developers. Work on enterprise-level applications.",
        ),
        salary: "$90,000 - $120,000",
        job_url: "https://www.monster.com/jobs/",
        days_ago: 7,
    },
    Template {
        title: TitleShape::Fixed("Software Development Engineer"),
        company: "Cloud Services Inc.",
        location: "Seattle, WA",
        description: DescriptionShape::Fixed(
            "Build and maintain cloud-based solutions. Strong technical skills required.",
        ),
        salary: "$115,000 - $145,000",
        job_url: "https://www.dice.com/jobs/",
        days_ago: 10,
    },
];

/// Size of the fallback template set; `generate` never returns more.
pub const FALLBACK_SIZE: usize = TEMPLATES.len();

/// Builds up to `limit` synthetic listings from the first three skills.
/// Output depends only on `skills`, `limit` and `today`.
pub fn generate(skills: &[String], limit: usize, today: NaiveDate) -> Vec<Job> {
    let top: Vec<&str> = skills.iter().take(TOP_SKILLS).map(String::as_str).collect();
    let lead = top.first().map(|s| capitalize(s));
    let skill_list = if top.is_empty() {
        GENERIC_SKILL_PHRASE.to_string()
    } else {
        top.join(", ")
    };
    let lead_skill = top.first().copied().unwrap_or(GENERIC_SKILL_PHRASE);

    TEMPLATES
        .iter()
        .take(limit.min(FALLBACK_SIZE))
        .map(|t| Job {
            title: match t.title {
                TitleShape::Prefixed(prefix) => format!(
                    "{prefix} {} Developer",
                    lead.as_deref().unwrap_or(GENERIC_TITLE_SKILL)
                ),
                TitleShape::Suffixed(suffix) => match &lead {
                    Some(lead) => format!("{lead} {suffix}"),
                    None => suffix.to_string(),
                },
                TitleShape::Fixed(title) => title.to_string(),
            },
            company: t.company.to_string(),
            location: t.location.to_string(),
            description: match t.description {
                DescriptionShape::AllSkills => format!(
                    "Seeking experienced developer proficient in {skill_list}. Work on cutting-edge projects with modern technologies."
                ),
                DescriptionShape::LeadSkill => format!(
                    "Join our team working with {lead_skill} and modern frameworks. Competitive benefits and growth opportunities."
                ),
                DescriptionShape::Fixed(text) => text.to_string(),
            },
            salary: t.salary.to_string(),
            job_url: t.job_url.to_string(),
            posted_date: (today - Duration::days(t.days_ago))
                .format("%Y-%m-%d")
                .to_string(),
            job_type: "Full-time".to_string(),
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_titles_use_capitalized_lead_skill() {
        let jobs = generate(&skills(&["rust"]), 3, today());
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].title, "Senior Rust Developer");
        assert_eq!(jobs[1].title, "Rust Software Engineer");
        assert_eq!(jobs[2].title, "Full Stack Developer");
    }

    #[test]
    fn test_full_template_when_limit_is_large() {
        let jobs = generate(&skills(&["go"]), 10, today());
        assert_eq!(jobs.len(), FALLBACK_SIZE);
    }

    #[test]
    fn test_description_lists_only_top_three_skills() {
        let jobs = generate(&skills(&["python", "django", "sql", "docker"]), 1, today());
        assert!(jobs[0].description.contains("python, django, sql"));
        assert!(!jobs[0].description.contains("docker"));
    }

    #[test]
    fn test_dates_get_older_down_the_list() {
        let jobs = generate(&skills(&["rust"]), 5, today());
        assert_eq!(jobs[0].posted_date, "2024-03-13");
        let dates: Vec<&str> = jobs.iter().map(|j| j.posted_date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_is_deterministic() {
        let a = generate(&skills(&["java", "spring"]), 5, today());
        let b = generate(&skills(&["java", "spring"]), 5, today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_skills_use_generic_titles() {
        let jobs = generate(&[], 2, today());
        assert_eq!(jobs[0].title, "Senior Software Developer");
        assert_eq!(jobs[1].title, "Software Engineer");
        assert!(jobs[0].description.contains(GENERIC_SKILL_PHRASE));
    }

    #[test]
    fn test_capitalize_handles_unicode_and_empty() {
        assert_eq!(capitalize("élixir"), "Élixir");
        assert_eq!(capitalize(""), "");
    }
}
