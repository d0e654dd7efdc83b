//! Persistence boundary for pipeline results.
//!
//! Services hold `Arc<dyn ResumeStore>` / `Arc<dyn CoverLetterStore>`. Every
//! write of a scoring record is a replace: the store deletes the previous
//! record and inserts the new one as one atomic unit scoped to the owning
//! document, so at most one current validation/evaluation exists per document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::contracts::{
    CompanyResearch, CoverLetterDocument, CoverLetterEvaluation, HrValidation, ResumeDocument,
};

pub mod codec;
#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use codec::CodecError;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored data could not be decoded: {0}")]
    Codec(#[from] CodecError),
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResume {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub jd_text: String,
    /// Raw candidate texts the resume was generated from; kept so a
    /// regenerate can re-run with the same inputs.
    pub source_texts: Vec<String>,
    pub content: ResumeDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredValidation {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub validation: HrValidation,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredCoverLetter {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub jd_text: String,
    pub resume_text: String,
    pub master_cover_letter_text: String,
    pub company_research: CompanyResearch,
    pub content: CoverLetterDocument,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEvaluation {
    pub id: Uuid,
    pub cover_letter_id: Uuid,
    pub evaluation: CoverLetterEvaluation,
    pub created_at: DateTime<Utc>,
}

/// A resume together with its current validation, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeWithValidation {
    pub resume: StoredResume,
    pub validation: Option<StoredValidation>,
}

pub struct NewResume {
    pub owner_id: Uuid,
    pub jd_text: String,
    pub source_texts: Vec<String>,
    pub content: ResumeDocument,
    pub validation: Option<HrValidation>,
}

pub struct NewCoverLetter {
    pub owner_id: Uuid,
    pub jd_text: String,
    pub resume_text: String,
    pub master_cover_letter_text: String,
    pub company_research: CompanyResearch,
    pub content: CoverLetterDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Store traits
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists a freshly generated resume and, if present, its validation.
    async fn insert_resume(&self, new: NewResume) -> Result<ResumeWithValidation, StoreError>;

    async fn find_resume(&self, id: Uuid, owner_id: Uuid) -> Result<Option<StoredResume>, StoreError>;

    /// Overwrites the resume content and replaces its validation in one atomic
    /// unit. The previous validation is always removed; `validation` is
    /// inserted when present. Returns `None` if the resume does not exist for
    /// this owner.
    async fn replace_resume_run(
        &self,
        id: Uuid,
        owner_id: Uuid,
        content: ResumeDocument,
        validation: Option<HrValidation>,
    ) -> Result<Option<ResumeWithValidation>, StoreError>;

    async fn find_validation(&self, resume_id: Uuid) -> Result<Option<StoredValidation>, StoreError>;
}

#[async_trait]
pub trait CoverLetterStore: Send + Sync {
    async fn insert_cover_letter(&self, new: NewCoverLetter) -> Result<StoredCoverLetter, StoreError>;

    async fn find_cover_letter(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<StoredCoverLetter>, StoreError>;

    /// Deletes any prior evaluation of the cover letter and inserts this one,
    /// atomically. Returns `None` if the cover letter does not exist for this
    /// owner.
    async fn replace_evaluation(
        &self,
        cover_letter_id: Uuid,
        owner_id: Uuid,
        evaluation: CoverLetterEvaluation,
    ) -> Result<Option<StoredEvaluation>, StoreError>;

    async fn find_evaluation(
        &self,
        cover_letter_id: Uuid,
    ) -> Result<Option<StoredEvaluation>, StoreError>;
}
