//! Response Parser: recovers a `ScreeningResult` from the model's free-form reply.

use thiserror::Error;

use super::ScreeningResult;

/// The reply was not valid screening JSON. Carries the untouched reply for manual inspection.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ParseFailure {
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

/// Removes every ```` ```json ```` and ```` ``` ```` marker, then trims whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strips fences, then parses the remainder as a `ScreeningResult`.
pub fn parse_screening_response(raw: &str) -> Result<ScreeningResult, ParseFailure> {
    serde_json::from_str(&strip_code_fences(raw)).map_err(|source| ParseFailure {
        raw: raw.to_string(),
        source,
    })
}
