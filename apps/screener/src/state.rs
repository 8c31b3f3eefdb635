use std::sync::Arc;

use crate::extract::TextExtractor;
use crate::llm_client::LanguageModel;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn LanguageModel>,
    pub extractor: Arc<dyn TextExtractor>,
    pub store: ResultStore,
}
