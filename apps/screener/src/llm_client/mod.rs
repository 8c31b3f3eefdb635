/// LLM Client: the single point of entry for every model call in the screener.
///
/// Callers depend on the `LanguageModel` capability only; the concrete backend
/// (Gemini or Anthropic) is chosen once at startup from `Config`.
///
/// Each prompt is sent exactly once. There is no retry or backoff; a failure is
/// returned to the caller, which decides whether to skip the item.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, LlmProvider};

pub mod anthropic;
pub mod gemini;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` and returns the model's free-form text reply.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Builds the model selected by `config.provider`.
pub fn build_model(config: &Config) -> Result<Arc<dyn LanguageModel>, LlmError> {
    let http = http_client(config.timeout_secs)?;
    let model: Arc<dyn LanguageModel> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            http,
            config.api_key.clone(),
            config.model.clone(),
        )),
        LlmProvider::Anthropic => Arc::new(AnthropicClient::new(
            http,
            config.api_key.clone(),
            config.model.clone(),
        )),
    };
    info!(
        "LLM client initialized (provider: {:?}, model: {})",
        config.provider, config.model
    );
    Ok(model)
}

fn http_client(timeout_secs: u64) -> Result<Client, LlmError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Pulls a human-readable message out of a non-success response body.
/// Both providers wrap errors as `{"error": {"message": ...}}`.
fn error_message(body: String) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: EnvelopeBody,
    }

    #[derive(serde::Deserialize)]
    struct EnvelopeBody {
        message: String,
    }

    serde_json::from_str::<Envelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
