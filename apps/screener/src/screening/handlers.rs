//! Axum route handlers for the Screening API.

use std::io::Write;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::TextExtractor;
use crate::jobs::{self, JobDescription, CATALOG};
use crate::screening::{screen_text, ScreenError, ScreeningResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub result: ScreeningResult,
    pub report_path: String,
}

/// GET /api/v1/job-descriptions
pub async fn handle_list_job_descriptions() -> Json<&'static [JobDescription]> {
    Json(&CATALOG[..])
}

/// POST /api/v1/screen
///
/// Multipart body: a `resume` file part plus either a `job_description` text part
/// or a `job_key` naming one of the built-in descriptions.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreenResponse>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut job_description: Option<String> = None;
    let mut job_key: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?)
            }
            "job_description" | "job_key" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read field '{name}': {e}"))
                })?;
                if name == "job_key" {
                    job_key = Some(text);
                } else {
                    job_description = Some(text);
                }
            }
            _ => {}
        }
    }

    let resume = resume
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("A non-empty 'resume' file part is required".to_string()))?;
    let job_description = resolve_job_description(job_description, job_key)?;

    // PDF parsing and file writes run off the async workers.
    let extractor = state.extractor.clone();
    let resume_text =
        tokio::task::spawn_blocking(move || extract_upload(extractor.as_ref(), &resume))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            })??;

    let result = screen_text(&resume_text, &job_description, state.model.as_ref()).await?;

    let store = state.store.clone();
    let saved = result.clone();
    let report_path = tokio::task::spawn_blocking(move || store.save(&saved))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in report save: {e}"))
        })??;
    info!(
        "Screened {}: {}/100 - {} ({})",
        result.candidate_name,
        result.match_score,
        result.recommendation,
        report_path.display()
    );

    Ok(Json(ScreenResponse {
        result,
        report_path: report_path.display().to_string(),
    }))
}

/// Writes the upload to a temporary `.pdf` file and extracts its text. The file is removed on return.
fn extract_upload(extractor: &dyn TextExtractor, resume: &[u8]) -> Result<String, AppError> {
    let mut upload = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile()
        .context("Failed to create temporary upload file")?;
    upload
        .write_all(resume)
        .context("Failed to write temporary upload file")?;

    extractor
        .extract(upload.path())
        .map_err(|e| ScreenError::from(e).into())
}

fn resolve_job_description(
    text: Option<String>,
    key: Option<String>,
) -> Result<String, AppError> {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        return Ok(text);
    }
    match key {
        Some(key) => jobs::find(&key)
            .map(|job| job.description.to_string())
            .ok_or_else(|| AppError::Validation(format!("Unknown job_key '{}'", key.trim()))),
        None => Err(AppError::Validation(
            "Either 'job_description' or 'job_key' is required".to_string(),
        )),
    }
}
