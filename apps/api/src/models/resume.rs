use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// `generated_resumes` row. `content` holds a versioned `ResumeDocument`.
#[derive(Debug, Clone, FromRow)]
pub struct GeneratedResumeRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub jd_text: String,
    pub source_texts: Vec<String>,
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `hr_validations` row. Scores are duplicated into columns so the table's
/// CHECK constraints guard them; `content` is the versioned `HrValidation`.
#[derive(Debug, Clone, FromRow)]
pub struct HrValidationRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}
