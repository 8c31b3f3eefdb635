//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::extract::{ExtractError, TextExtractor};
use crate::llm_client::{LanguageModel, LlmError};

type Responder = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

/// A `LanguageModel` that answers from a closure and records every prompt.
pub struct StubModel {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn new(responder: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `text`.
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self::new(move |_| {
            Err(LlmError::Api {
                status,
                message: "service unavailable".to_string(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}

/// A `TextExtractor` keyed by file name. Unknown names are "not found" unless a
/// fallback text is set; names registered with `with_corrupt` fail like a malformed PDF.
#[derive(Default)]
pub struct StubExtractor {
    texts: HashMap<String, Option<String>>,
    fallback: Option<String>,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, file_name: &str, text: &str) -> Self {
        self.texts
            .insert(file_name.to_string(), Some(text.to_string()));
        self
    }

    pub fn with_corrupt(mut self, file_name: &str) -> Self {
        self.texts.insert(file_name.to_string(), None);
        self
    }

    /// Text returned for any file name not registered explicitly.
    pub fn with_fallback(mut self, text: &str) -> Self {
        self.fallback = Some(text.to_string());
        self
    }
}

impl TextExtractor for StubExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        match self.texts.get(name) {
            Some(Some(text)) => Ok(text.clone()),
            Some(None) => Err(ExtractError::Pdf {
                path: path.to_path_buf(),
                message: "invalid file header".to_string(),
            }),
            None => match &self.fallback {
                Some(text) => Ok(text.clone()),
                None => Err(ExtractError::NotFound(PathBuf::from(path))),
            },
        }
    }
}

/// A screening reply in the shape the prompt asks for.
pub fn screening_json(name: &str, score: &str, recommendation: &str) -> String {
    serde_json::json!({
        "candidate_name": name,
        "match_score": score,
        "key_strengths": ["Python", "SQL"],
        "missing_critical_skills": [],
        "recommendation": recommendation,
        "reasoning": format!("{name} was evaluated."),
    })
    .to_string()
}
