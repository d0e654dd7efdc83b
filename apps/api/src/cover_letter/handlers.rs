use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contracts::{CompanyResearch, CoverLetterDocument, CoverLetterEvaluation};
use crate::cover_letter::service::CoverLetterWithEvaluation;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{StoredCoverLetter, StoredEvaluation};

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct GenerateCoverLetterRequest {
    pub user_id: Uuid,
    pub resume_text: String,
    pub master_cover_letter_text: String,
    pub jd_text: String,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoverLetterResponse {
    pub cover_letter_id: Uuid,
    pub content: CoverLetterDocument,
    pub company_research: CompanyResearch,
    pub evaluation: Option<CoverLetterEvaluation>,
    pub created_at: DateTime<Utc>,
}

impl CoverLetterResponse {
    fn new(letter: StoredCoverLetter, evaluation: Option<StoredEvaluation>) -> Self {
        Self {
            cover_letter_id: letter.id,
            content: letter.content,
            company_research: letter.company_research,
            evaluation: evaluation.map(|e| e.evaluation),
            created_at: letter.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub cover_letter_id: Uuid,
    pub evaluation: CoverLetterEvaluation,
    pub evaluated_at: DateTime<Utc>,
}

/// POST /api/v1/cover-letters
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<GenerateCoverLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterResponse>), AppError> {
    let stored = state
        .cover_letters
        .generate(
            req.user_id,
            req.resume_text,
            req.master_cover_letter_text,
            req.jd_text,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(CoverLetterResponse::new(stored, None))))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let CoverLetterWithEvaluation { letter, evaluation } =
        state.cover_letters.get(id, params.user_id).await?;
    Ok(Json(CoverLetterResponse::new(letter, evaluation)))
}

/// POST /api/v1/cover-letters/:id/evaluate
pub async fn handle_evaluate_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let stored = state.cover_letters.evaluate(id, req.user_id).await?;
    Ok(Json(EvaluationResponse {
        cover_letter_id: stored.cover_letter_id,
        evaluation: stored.evaluation,
        evaluated_at: stored.created_at,
    }))
}
