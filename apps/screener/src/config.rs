use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::{anthropic, gemini};

/// Which hosted model backs the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    Anthropic,
}

impl LlmProvider {
    fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => gemini::DEFAULT_MODEL,
            LlmProvider::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            other => bail!("Unsupported LLM_PROVIDER '{other}' (expected 'gemini' or 'anthropic')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// API keys are never read from anywhere but the environment (or `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub results_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider: LlmProvider = lookup("LLM_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .parse()?;

        let key_var = provider.api_key_var();
        let api_key = lookup(key_var)
            .filter(|k| !k.trim().is_empty())
            .with_context(|| format!("Required environment variable '{key_var}' is not set"))?;

        Ok(Config {
            provider,
            api_key,
            model: lookup("LLM_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| provider.default_model().to_string()),
            timeout_secs: lookup("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            results_dir: lookup("RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("results")),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
