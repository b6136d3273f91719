//! Structured-data extraction pipeline.
//!
//! Raw resume text goes to the completion service with a structured
//! extraction prompt; the response is sanitized, parsed, and normalized
//! into a `CandidateRecord`. Any failure along that path — no credential,
//! transport error, non-2xx status, unparsable output — drops to the
//! offline rule-based extractor instead. The pipeline as a whole never
//! fails: every reachable path terminates in a valid record.

pub mod fallback;
pub mod normalize;
pub mod prompts;
pub mod sanitize;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::models::candidate::CandidateRecord;

use self::prompts::{EXTRACTION_PROMPT_TEMPLATE, EXTRACTION_SYSTEM};

/// Internal to the pipeline — every variant is recovered by falling back,
/// never surfaced to the caller.
#[derive(Debug, Error)]
enum ExtractError {
    #[error("completion service unavailable: {0}")]
    Unavailable(#[from] LlmError),

    #[error("completion output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("completion output is not a JSON object")]
    NotAnObject,
}

/// Runs the extraction pipeline for one request. Cheap to clone; each
/// request's run owns its own prompt, response buffer, and record.
#[derive(Clone)]
pub struct ResumeExtractor {
    llm: LlmClient,
}

impl ResumeExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Total: always returns a structurally valid record. The LLM path is
    /// preferred; every failure mode routes to the rule-based fallback.
    pub async fn extract(&self, resume_text: &str) -> CandidateRecord {
        match self.extract_with_llm(resume_text).await {
            Ok(record) => record,
            Err(e) => {
                warn!("LLM extraction failed ({e}); using rule-based fallback");
                fallback::extract_with_rules(resume_text)
            }
        }
    }

    async fn extract_with_llm(&self, resume_text: &str) -> Result<CandidateRecord, ExtractError> {
        let prompt = build_prompt(resume_text);
        let raw = self.llm.complete(&prompt, EXTRACTION_SYSTEM).await?;

        let cleaned = sanitize::clean_json_text(&raw);
        let parsed: Value = serde_json::from_str(&cleaned)?;
        if !parsed.is_object() {
            return Err(ExtractError::NotAnObject);
        }

        debug!("Completion parsed; normalizing record");
        Ok(normalize::normalize_record(&parsed))
    }
}

/// Renders the extraction instruction with the raw resume text embedded
/// verbatim. Pure; no truncation happens here — the transport timeout and
/// output-token ceiling bound the call instead.
pub fn build_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
