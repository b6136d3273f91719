//! Rule-based fallback extractor — fully offline pattern matching.
//!
//! Used whenever the completion service is unavailable, errors, or returns
//! output that cannot be parsed. Derives the same record shape from the raw
//! text alone. Experience-table reconstruction is deliberately not
//! attempted on this path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::normalize::{self, MAX_CERTIFICATIONS};
use crate::models::candidate::CandidateRecord;

/// Lines scanned from the top of the document when guessing the name.
const NAME_SCAN_LINES: usize = 20;
const MAX_NAME_WORDS: usize = 4;
/// Skill matches are capped below the normalizer's limit of 15.
const MAX_FALLBACK_SKILLS: usize = 12;
const SUMMARY_MIN_CHARS: usize = 100;
const SUMMARY_TRUNCATE_CHARS: usize = 300;
const MIN_CERTIFICATION_CHARS: usize = 10;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+]?[\d\s\-()]{10,15}").expect("valid regex"));

/// Substrings that disqualify a line from being the candidate's name.
const NAME_STOPWORDS: &[&str] = &["over", "years", "experience", "seeking"];

const LOCATION_KEYWORDS: &[&str] = &[
    "bengaluru",
    "bangalore",
    "mumbai",
    "delhi",
    "chennai",
    "hyderabad",
    "pune",
];

/// Technology vocabulary scanned for skill mentions. Output keeps this
/// order, not source order.
const SKILL_VOCABULARY: &[&str] = &[
    "AWS",
    "Azure",
    "Linux",
    "Windows",
    "Docker",
    "Kubernetes",
    "Python",
    "Java",
    "Terraform",
    "Ansible",
    "Jenkins",
    "Git",
    "SQL",
    "Oracle",
    "MySQL",
    "MongoDB",
    "Windchill",
    "PLM",
    "Cisco",
    "RHEL",
    "CentOS",
    "Ubuntu",
];

/// Derives a complete record from raw text alone. Never fails and never
/// returns a value requiring further defaulting.
pub fn extract_with_rules(resume_text: &str) -> CandidateRecord {
    let lines: Vec<&str> = resume_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    CandidateRecord {
        name: extract_name(&lines),
        location: extract_location(&lines),
        email: EMAIL
            .find(resume_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: PHONE
            .find(resume_text)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        date: normalize::current_date(),
        subject: normalize::DEFAULT_SUBJECT.to_string(),
        summary: extract_summary(&lines),
        education: normalize::default_education(),
        experience_table: Vec::new(),
        skills: extract_skills(resume_text),
        certifications: extract_certifications(&lines),
        cover_letter: String::new(),
    }
}

/// First line among the first 20 that looks like a person's name: at most
/// 4 words, longer than 2 characters, no digit in its first 15 characters,
/// no `@`, and no summary-style stopword.
fn extract_name(lines: &[&str]) -> String {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let lower = line.to_lowercase();
            line.split_whitespace().count() <= MAX_NAME_WORDS
                && line.chars().count() > 2
                && !line.chars().take(15).any(|c| c.is_ascii_digit())
                && !line.contains('@')
                && !NAME_STOPWORDS.iter().any(|word| lower.contains(word))
        })
        .map(|line| line.to_string())
        .unwrap_or_else(|| normalize::DEFAULT_NAME.to_string())
}

fn extract_location(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().count() < 50 && LOCATION_KEYWORDS.iter().any(|city| lower.contains(city))
        })
        .map(|line| title_case(line))
        .unwrap_or_else(|| normalize::DEFAULT_LOCATION.to_string())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First substantial line mentioning years/experience, truncated at 300
/// characters with an ellipsis. Empty when nothing qualifies.
fn extract_summary(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().count() > SUMMARY_MIN_CHARS
                && (lower.contains("years") || lower.contains("experience"))
        })
        .map(|line| {
            if line.chars().count() > SUMMARY_TRUNCATE_CHARS {
                let truncated: String = line.chars().take(SUMMARY_TRUNCATE_CHARS).collect();
                format!("{truncated}...")
            } else {
                line.to_string()
            }
        })
        .unwrap_or_default()
}

fn extract_skills(resume_text: &str) -> Vec<String> {
    let lower = resume_text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .take(MAX_FALLBACK_SKILLS)
        .map(|skill| skill.to_string())
        .collect()
}

fn extract_certifications(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            // Bare section headers are not entries.
            if lower == "certifications" || lower == "certification" {
                return false;
            }
            (lower.contains("certified") || lower.contains("certification"))
                && line.chars().count() > MIN_CERTIFICATION_CHARS
        })
        .map(|line| line.trim_start_matches(['\u{2022}', '-', ' ', '\t']).trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_CERTIFICATIONS)
        .collect()
}
