//! Validation and normalization of parsed extraction output.
//!
//! Accepts an untrusted `serde_json::Value` and always produces a complete
//! `CandidateRecord`: unrecognized shapes are dropped, missing or empty
//! fields take the default table, list fields are trimmed and capped, and
//! the cover letter is synthesized when absent and normalized always.
//! This step never fails — the worst-case input yields an all-defaults
//! record.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::candidate::{CandidateRecord, EducationEntry, ExperienceEntry};

pub const MAX_SKILLS: usize = 15;
pub const MAX_CERTIFICATIONS: usize = 10;

pub const DEFAULT_NAME: &str = "Professional Candidate";
pub const DEFAULT_LOCATION: &str = "Bengaluru";
pub const DEFAULT_SUBJECT: &str = "Application for Technical Position";
const DEFAULT_SUMMARY: &str =
    "Experienced professional seeking opportunities in technology and infrastructure.";
const DEFAULT_DEGREE: &str = "BCA";
const DEFAULT_INSTITUTION: &str = "University Name";
const DEFAULT_SKILLS: &[&str] = &["Linux", "AWS", "Cloud Computing", "System Administration"];

pub fn default_education() -> Vec<EducationEntry> {
    vec![EducationEntry {
        degree: DEFAULT_DEGREE.to_string(),
        institution: DEFAULT_INSTITUTION.to_string(),
    }]
}

/// Today, formatted the way the record carries dates (`DD-Mon-YYYY`).
pub fn current_date() -> String {
    Local::now().format("%d-%b-%Y").to_string()
}

/// Builds a fully-defaulted, shape-correct record from parsed but
/// untrusted JSON.
pub fn normalize_record(value: &Value) -> CandidateRecord {
    let skills = clean_string_list(value.get("skills"), MAX_SKILLS);
    let skills = if skills.is_empty() {
        DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect()
    } else {
        skills
    };

    let mut record = CandidateRecord {
        name: text_field(value, "name").unwrap_or_else(|| DEFAULT_NAME.to_string()),
        location: text_field(value, "location").unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        email: text_field(value, "email").unwrap_or_default(),
        phone: text_field(value, "phone").unwrap_or_default(),
        date: text_field(value, "date").unwrap_or_else(current_date),
        subject: text_field(value, "subject").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        summary: text_field(value, "summary").unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        education: reshape_education(value.get("education")),
        experience_table: reshape_experience(value.get("experience_table")),
        skills,
        certifications: clean_string_list(value.get("certifications"), MAX_CERTIFICATIONS),
        cover_letter: text_field(value, "cover_letter").unwrap_or_default(),
    };

    if record.cover_letter.is_empty() {
        record.cover_letter = generate_cover_letter(&record);
    }
    record.cover_letter = normalize_cover_letter(&record.cover_letter, &record.name);

    record
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts `[{"degree": ..., "institution": ...}]` or `[[degree, institution], ...]`.
/// Entries missing either half are dropped; an empty result takes the
/// default pair.
fn reshape_education(value: Option<&Value>) -> Vec<EducationEntry> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return default_education();
    };

    let mut reshaped = Vec::new();
    for entry in entries {
        match entry {
            Value::Object(fields) => {
                let degree = fields.get("degree").and_then(non_empty_str);
                let institution = fields.get("institution").and_then(non_empty_str);
                if let (Some(degree), Some(institution)) = (degree, institution) {
                    reshaped.push(EducationEntry {
                        degree: degree.to_string(),
                        institution: institution.to_string(),
                    });
                }
            }
            Value::Array(pair) if pair.len() >= 2 => {
                let degree = non_empty_str(&pair[0]);
                let institution = non_empty_str(&pair[1]);
                if let (Some(degree), Some(institution)) = (degree, institution) {
                    reshaped.push(EducationEntry {
                        degree: degree.to_string(),
                        institution: institution.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    if reshaped.is_empty() {
        default_education()
    } else {
        reshaped
    }
}

/// Entries without a company name are dropped. A bare string in
/// `roles_responsibility` becomes a single-element list.
fn reshape_experience(value: Option<&Value>) -> Vec<ExperienceEntry> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut reshaped = Vec::new();
    for entry in entries {
        let Some(fields) = entry.as_object() else {
            continue;
        };
        let Some(company_name) = fields.get("company_name").and_then(non_empty_str) else {
            continue;
        };
        let roles_responsibility = match fields.get("roles_responsibility") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(non_empty_str)
                .map(String::from)
                .collect(),
            Some(Value::String(text)) if !text.trim().is_empty() => {
                vec![text.trim().to_string()]
            }
            _ => Vec::new(),
        };
        reshaped.push(ExperienceEntry {
            company_name: company_name.to_string(),
            roles_responsibility,
        });
    }
    reshaped
}

/// First `cap` trimmed, non-empty string entries. Duplicates are preserved.
fn clean_string_list(value: Option<&Value>, cap: usize) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(non_empty_str)
                .map(String::from)
                .take(cap)
                .collect()
        })
        .unwrap_or_default()
}

/// Deterministically synthesizes a cover letter from extracted fields.
/// The greeting is intentionally omitted — the rendered document supplies
/// its own "Dear Hiring Manager," line.
pub fn generate_cover_letter(record: &CandidateRecord) -> String {
    let top_skills = record
        .skills
        .iter()
        .take(6)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let certs = record
        .certifications
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let recent_company = record
        .experience_table
        .first()
        .map(|entry| entry.company_name.as_str())
        .unwrap_or("");

    let mut opening = format!("I am excited to apply for {}.", record.subject);
    if !record.summary.is_empty() {
        opening.push(' ');
        opening.push_str(record.summary.trim());
    }

    let mut body_lines = Vec::new();
    if !recent_company.is_empty() {
        body_lines.push(format!(
            "In my recent experience, I contributed at {recent_company}."
        ));
    }
    if !top_skills.is_empty() {
        body_lines.push(format!("My core strengths include {top_skills}."));
    }
    if !certs.is_empty() {
        body_lines.push(format!("I also hold certifications such as {certs}."));
    }
    if body_lines.is_empty() {
        body_lines.push(
            "I bring a strong track record of delivering reliable solutions in fast-paced environments."
                .to_string(),
        );
    }
    let body = body_lines.join(" ");

    let interest = "I am drawn to this opportunity because it aligns with my experience and the impact I aim to deliver. \
        I value ownership, collaboration, and continuous improvement, and I am confident I can add value from day one."
        .to_string();

    let closing = format!(
        "Thank you for your time and consideration. I would welcome the chance to discuss how my background \
         can support your team's goals.\n\nSincerely,\n{}",
        record.name
    );

    [opening, body, interest, closing].join("\n\n")
}

static GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*dear\s+hiring\s+manager\s*[,:]?\s*\n?\n?").expect("valid regex"));
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").expect("valid regex"));
static VALEDICTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(sincerely|regards|best regards|best|thanks|thank you|yours truly|yours faithfully)\b[\s,]*$")
        .expect("valid regex")
});
static SIGNATURE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z .'-]{2,}$").expect("valid regex"));

/// A trailing paragraph at or below this word count can be a signature.
const MAX_SIGNATURE_WORDS: usize = 5;

/// Enforces the canonical closing `Sincerely,\n{name}` and strips the
/// greeting and sign-off text the completion service tends to add on its
/// own. Keeps the multi-paragraph structure.
pub fn normalize_cover_letter(text: &str, candidate_name: &str) -> String {
    let content = GREETING.replace(text.trim(), "").into_owned();

    let mut paragraphs: Vec<String> = PARAGRAPH_BREAK
        .split(&content)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(String::from)
        .collect();

    while let Some(last) = paragraphs.last() {
        if is_valediction(last) || is_signature_line(last) {
            paragraphs.pop();
        } else {
            break;
        }
    }

    let body = paragraphs.join("\n\n");
    let closing = format!("Sincerely,\n{candidate_name}");
    if body.ends_with(&closing) {
        return body;
    }
    if body.is_empty() {
        return closing;
    }
    format!("{body}\n\n{closing}")
}

/// A paragraph whose first line is a known sign-off word, optionally
/// followed by a single signature line.
fn is_valediction(paragraph: &str) -> bool {
    let mut lines = paragraph.lines();
    let Some(first) = lines.next() else {
        return false;
    };
    VALEDICTION.is_match(first.trim()) && lines.count() <= 1
}

/// A short standalone name-like line left behind as a signature.
fn is_signature_line(paragraph: &str) -> bool {
    !paragraph.contains('\n')
        && SIGNATURE_LINE.is_match(paragraph)
        && paragraph.split_whitespace().count() <= MAX_SIGNATURE_WORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gets_full_default_table() {
        let record = normalize_record(&json!({}));

        assert_eq!(record.name, DEFAULT_NAME);
        assert_eq!(record.location, DEFAULT_LOCATION);
        assert_eq!(record.email, "");
        assert_eq!(record.phone, "");
        assert_eq!(record.subject, DEFAULT_SUBJECT);
        assert_eq!(record.summary, DEFAULT_SUMMARY);
        assert_eq!(record.education, default_education());
        assert!(record.experience_table.is_empty());
        assert_eq!(record.skills.len(), DEFAULT_SKILLS.len());
        assert!(record.certifications.is_empty());
        assert!(!record.date.is_empty());
    }

    #[test]
    fn test_empty_cover_letter_is_synthesized_with_closing() {
        let record = normalize_record(&json!({"name": "Jane Doe"}));

        assert!(record.cover_letter.contains("I am excited to apply for"));
        assert!(record.cover_letter.ends_with("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_education_entry_missing_institution_is_dropped() {
        let record = normalize_record(&json!({"education": [{"degree": "MBA"}]}));
        assert_eq!(record.education, default_education());
    }

    #[test]
    fn test_education_accepts_objects_and_pairs() {
        let record = normalize_record(&json!({
            "education": [
                {"degree": "MSc", "institution": "IIT Delhi"},
                ["BSc", "Pune University"],
                {"degree": "", "institution": "Nowhere"},
                "just a string",
            ]
        }));

        assert_eq!(
            record.education,
            vec![
                EducationEntry {
                    degree: "MSc".to_string(),
                    institution: "IIT Delhi".to_string(),
                },
                EducationEntry {
                    degree: "BSc".to_string(),
                    institution: "Pune University".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_skills_capped_at_fifteen_in_order_and_trimmed() {
        let skills: Vec<String> = (0..30).map(|i| format!("  skill-{i}  ")).collect();
        let record = normalize_record(&json!({"skills": skills}));

        assert_eq!(record.skills.len(), MAX_SKILLS);
        assert_eq!(record.skills[0], "skill-0");
        assert_eq!(record.skills[14], "skill-14");
    }

    #[test]
    fn test_skill_duplicates_are_preserved() {
        let record = normalize_record(&json!({
            "name": "Jane Doe",
            "skills": ["AWS", "AWS", "Linux"],
        }));
        assert_eq!(record.skills, vec!["AWS", "AWS", "Linux"]);
    }

    #[test]
    fn test_certifications_capped_at_ten() {
        let certs: Vec<String> = (0..12).map(|i| format!("cert-{i}")).collect();
        let record = normalize_record(&json!({"certifications": certs}));
        assert_eq!(record.certifications.len(), MAX_CERTIFICATIONS);
    }

    #[test]
    fn test_experience_bare_string_becomes_single_bullet() {
        let record = normalize_record(&json!({
            "experience_table": [
                {"company_name": "Acme as SRE (2020 - 2024)", "roles_responsibility": "Kept the lights on."},
                {"roles_responsibility": ["orphaned"]},
            ]
        }));

        assert_eq!(record.experience_table.len(), 1);
        assert_eq!(
            record.experience_table[0].roles_responsibility,
            vec!["Kept the lights on."]
        );
    }

    #[test]
    fn test_responsibilities_preserved_in_source_order() {
        let record = normalize_record(&json!({
            "experience_table": [{
                "company_name": "NTT Data as Windchill Admin (May 2012 To Oct 2023)",
                "roles_responsibility": [
                    "Daily Monitoring of all Windchill environments in AWS.",
                    "Handling L1 and L2 tickets via ticketing tool.",
                ],
            }]
        }));

        assert_eq!(
            record.experience_table[0].roles_responsibility,
            vec![
                "Daily Monitoring of all Windchill environments in AWS.",
                "Handling L1 and L2 tickets via ticketing tool.",
            ]
        );
    }

    #[test]
    fn test_cover_letter_greeting_is_stripped() {
        let record = normalize_record(&json!({
            "name": "Jane Doe",
            "cover_letter": "Dear Hiring Manager,\n\nI would like to apply, with ten years of experience.\n\nSincerely,\nJane Doe",
        }));

        assert!(!record.cover_letter.contains("Dear Hiring Manager"));
        assert!(record.cover_letter.ends_with("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_cover_letter_foreign_valediction_is_replaced() {
        let normalized = normalize_cover_letter(
            "I am thrilled to apply, and bring 12 years of experience.\n\nBest regards,\nJ. Random Model",
            "Jane Doe",
        );

        assert!(!normalized.contains("Best regards"));
        assert!(normalized.ends_with("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_cover_letter_trailing_signature_line_is_removed() {
        let normalized = normalize_cover_letter(
            "I am thrilled to apply, and bring 12 years of experience.\n\nSincerely,\n\nJane Doe",
            "Jane Doe",
        );

        assert_eq!(
            normalized,
            "I am thrilled to apply, and bring 12 years of experience.\n\nSincerely,\nJane Doe"
        );
    }

    #[test]
    fn test_cover_letter_canonical_closing_not_duplicated() {
        let input = "I am thrilled to apply, and bring 12 years of experience.\n\nSincerely,\nJane Doe";
        let normalized = normalize_cover_letter(input, "Jane Doe");

        assert_eq!(normalized.matches("Sincerely,").count(), 1);
        assert!(normalized.ends_with("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_synthesized_letter_references_profile_details() {
        let record = normalize_record(&json!({
            "name": "Jane Doe",
            "subject": "Application for the Position of Platform Engineer",
            "skills": ["AWS", "Linux"],
            "certifications": ["AWS Certified Solutions Architect"],
            "experience_table": [{"company_name": "Acme as SRE (2020 - 2024)", "roles_responsibility": []}],
        }));

        assert!(record
            .cover_letter
            .contains("Application for the Position of Platform Engineer"));
        assert!(record.cover_letter.contains("Acme as SRE (2020 - 2024)"));
        assert!(record.cover_letter.contains("AWS, Linux"));
        assert!(record.cover_letter.ends_with("Sincerely,\nJane Doe"));
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_to_defaults() {
        let record = normalize_record(&json!({
            "name": 42,
            "skills": "not a list",
            "education": {"degree": "MBA"},
            "experience_table": "none",
        }));

        assert_eq!(record.name, DEFAULT_NAME);
        assert_eq!(record.skills.len(), DEFAULT_SKILLS.len());
        assert_eq!(record.education, default_education());
        assert!(record.experience_table.is_empty());
    }
}
