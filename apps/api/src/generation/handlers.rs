//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::{build_prompt, modal_title, Role};
use crate::render::render;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub role: Role,
    pub job_title: String,
    pub skills_text: String,
}

/// The rendered document handed to the display surface.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub title: String,
    pub body_html: String,
}

/// POST /api/v1/generate
///
/// Full pipeline for one trigger: validate → build prompt → dispatch with
/// retry → render Markdown to HTML. Each request is an independent chain;
/// serializing overlapping triggers is the display surface's concern.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let job_title = request.job_title.trim();
    let skills_text = request.skills_text.trim();

    if job_title.is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    if skills_text.is_empty() {
        return Err(AppError::Validation(
            "skills_text cannot be empty".to_string(),
        ));
    }

    let prompt = build_prompt(request.role, job_title, skills_text);
    let text = state
        .llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("content generation failed: {e}")))?;

    Ok(Json(GenerateResponse {
        title: modal_title(request.role, job_title),
        body_html: render(&text),
    }))
}
