use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contracts::resume::RenderableResume;
use crate::contracts::{HrValidation, RecommendationItem, ResumeDocument};
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::ResumeWithValidation;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct GenerateResumeRequest {
    pub user_id: Uuid,
    /// Already-extracted text of each uploaded resume.
    pub resume_texts: Vec<String>,
    pub jd_text: String,
}

#[derive(Deserialize)]
pub struct RegenerateRequest {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct ApplyRecommendationsRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeResponse {
    pub resume_id: Uuid,
    pub jd_text: String,
    pub content: ResumeDocument,
    pub validation: Option<HrValidation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeWithValidation> for ResumeResponse {
    fn from(stored: ResumeWithValidation) -> Self {
        let ResumeWithValidation { resume, validation } = stored;
        Self {
            resume_id: resume.id,
            jd_text: resume.jd_text,
            content: resume.content,
            validation: validation.map(|v| v.validation),
            created_at: resume.created_at,
            updated_at: resume.updated_at,
        }
    }
}

/// POST /api/v1/resumes
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(req): Json<GenerateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let stored = state
        .resumes
        .generate(req.user_id, req.resume_texts, req.jd_text)
        .await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state.resumes.get(id, params.user_id).await?;
    Ok(Json(stored.into()))
}

/// POST /api/v1/resumes/:id/regenerate
pub async fn handle_regenerate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RegenerateRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state.resumes.regenerate(id, req.user_id).await?;
    Ok(Json(stored.into()))
}

/// POST /api/v1/resumes/:id/apply-recommendations
pub async fn handle_apply_recommendations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplyRecommendationsRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let stored = state
        .resumes
        .apply_recommendations(id, req.user_id, req.recommendations)
        .await?;
    Ok(Json(stored.into()))
}

/// GET /api/v1/resumes/:id/document
/// Renderer-facing view: bullets pre-split into bold/plain runs plus the
/// download file stem.
pub async fn handle_resume_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<RenderableResume>, AppError> {
    let view = state.resumes.render_view(id, params.user_id).await?;
    Ok(Json(view))
}
