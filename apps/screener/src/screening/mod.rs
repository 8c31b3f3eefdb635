//! Resume Screening: the per-resume pipeline.
//!
//! Flow: extract text → build prompt → call model → parse JSON → `ScreeningResult`.
//! Persisting and printing are left to the caller (console, batch runner, HTTP).

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::extract::{ExtractError, TextExtractor};
use crate::llm_client::{LanguageModel, LlmError};

pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod report;

pub use parser::{parse_screening_response, ParseFailure};

use prompts::SCREENING_PROMPT_TEMPLATE;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs to one screening call. Built per resume and dropped after the call.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
}

/// The model's assessment of one resume.
///
/// Only presence is checked: a field that is missing, `null` or of the wrong
/// JSON type falls back to its placeholder, and nothing is range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    #[serde(default = "unknown_candidate", deserialize_with = "candidate_name_or_unknown")]
    pub candidate_name: String,
    #[serde(default, deserialize_with = "match_score_or_placeholder")]
    pub match_score: MatchScore,
    #[serde(default, deserialize_with = "string_list")]
    pub key_strengths: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub missing_critical_skills: Vec<String>,
    #[serde(default, deserialize_with = "recommendation_or_unspecified")]
    pub recommendation: Recommendation,
    #[serde(default = "not_available", deserialize_with = "reasoning_or_placeholder")]
    pub reasoning: String,
}

fn unknown_candidate() -> String {
    "Unknown".to_string()
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

const NOT_AVAILABLE: &str = "N/A";

fn candidate_name_or_unknown<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        _ => unknown_candidate(),
    })
}

fn reasoning_or_placeholder<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        _ => not_available(),
    })
}

fn match_score_or_placeholder<'de, D: Deserializer<'de>>(de: D) -> Result<MatchScore, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Null => MatchScore::default(),
        Value::Number(n) => MatchScore::Number(n),
        Value::String(s) => MatchScore::Text(s),
        other => MatchScore::Other(other),
    })
}

/// Arrays keep every item (non-strings in their JSON form); anything else is an empty list.
fn string_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    let Value::Array(items) = Value::deserialize(de)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

fn recommendation_or_unspecified<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Recommendation, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(label) => Recommendation::from(label),
        _ => Recommendation::Unspecified,
    })
}

/// Match score as returned by the model: usually `85` or `"85"`, occasionally something else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchScore {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl MatchScore {
    /// Integer value of the score, if it has one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            MatchScore::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            MatchScore::Text(s) => s.trim().parse().ok(),
            MatchScore::Other(_) => None,
        }
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        MatchScore::Text(NOT_AVAILABLE.to_string())
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchScore::Number(n) => f.pad(&n.to_string()),
            MatchScore::Text(s) => f.pad(s),
            MatchScore::Other(v) => f.pad(&v.to_string()),
        }
    }
}

/// Hiring decision. Labels are matched case-insensitively; unknown labels are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recommendation {
    Interview,
    Reject,
    Other(String),
    #[default]
    Unspecified,
}

impl Recommendation {
    pub fn as_str(&self) -> &str {
        match self {
            Recommendation::Interview => "INTERVIEW",
            Recommendation::Reject => "REJECT",
            Recommendation::Other(label) => label,
            Recommendation::Unspecified => NOT_AVAILABLE,
        }
    }
}

impl From<String> for Recommendation {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "INTERVIEW" => Recommendation::Interview,
            "REJECT" => Recommendation::Reject,
            _ => Recommendation::Other(label),
        }
    }
}

impl From<Recommendation> for String {
    fn from(rec: Recommendation) -> Self {
        rec.as_str().to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Why a single resume could not be screened. Every variant is recoverable:
/// callers skip the item and move on.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Error loading resume: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Error during AI screening: {0}")]
    Model(#[from] LlmError),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] ParseFailure),
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub fn build_screening_prompt(request: &ScreeningRequest<'_>) -> String {
    SCREENING_PROMPT_TEMPLATE
        .replace("{job_description}", request.job_description)
        .replace("{resume_text}", request.resume_text)
}

/// Sends one screening prompt and returns the model's raw reply.
pub async fn screen_resume(
    model: &dyn LanguageModel,
    request: &ScreeningRequest<'_>,
) -> Result<String, LlmError> {
    let prompt = build_screening_prompt(request);
    model.generate(&prompt).await
}

/// Runs extract → prompt → model → parse for one resume file.
pub async fn process_resume(
    path: &Path,
    job_description: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
) -> Result<ScreeningResult, ScreenError> {
    let resume_text = extractor.extract(path)?;
    screen_text(&resume_text, job_description, model).await
}

/// Runs prompt → model → parse for resume text that has already been extracted.
pub async fn screen_text(
    resume_text: &str,
    job_description: &str,
    model: &dyn LanguageModel,
) -> Result<ScreeningResult, ScreenError> {
    info!("Resume loaded. Length: {} characters.", resume_text.chars().count());

    info!("Analyzing the candidate...");
    let raw = screen_resume(
        model,
        &ScreeningRequest {
            resume_text,
            job_description,
        },
    )
    .await?;

    Ok(parse_screening_response(&raw)?)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
