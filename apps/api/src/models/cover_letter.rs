use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct GeneratedCoverLetterRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub jd_text: String,
    pub resume_text: String,
    pub master_cover_letter_text: String,
    pub company_research: Value,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CoverLetterEvaluationRow {
    pub id: Uuid,
    pub cover_letter_id: Uuid,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}
