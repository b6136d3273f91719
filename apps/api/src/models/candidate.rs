use serde::{Deserialize, Serialize};

/// The canonical structured representation of one candidate.
///
/// Constructed once per request — by the LLM extraction path or the
/// rule-based fallback — consumed by the document renderer, then discarded.
/// Nothing is persisted between requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub location: String,
    /// Empty, or a regex-matched email shape from extraction time.
    pub email: String,
    /// Empty, or a loosely-matched digit/punctuation sequence.
    pub phone: String,
    /// Empty, or `DD-Mon-YYYY`.
    pub date: String,
    pub subject: String,
    /// 4-5 sentence professional summary.
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience_table: Vec<ExperienceEntry>,
    /// Trimmed, capped at 15 entries.
    pub skills: Vec<String>,
    /// Trimmed, capped at 10 entries.
    pub certifications: Vec<String>,
    /// Multi-paragraph text (blank-line separated). When non-empty it ends
    /// with `Sincerely,\n{name}`, where `{name}` is this record's `name`.
    pub cover_letter: String,
}

/// One row of the education table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
}

/// One employer block: a company line plus the candidate's responsibility
/// bullets, preserved verbatim from the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company_name: String,
    #[serde(default)]
    pub roles_responsibility: Vec<String>,
}
