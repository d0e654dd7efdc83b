use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use super::codec::{decode, encode};
use super::{
    CoverLetterStore, NewCoverLetter, NewResume, ResumeStore, ResumeWithValidation, StoreError,
    StoredCoverLetter, StoredEvaluation, StoredResume, StoredValidation,
};
use crate::contracts::{CoverLetterEvaluation, HrValidation, ResumeDocument};
use crate::models::cover_letter::{CoverLetterEvaluationRow, GeneratedCoverLetterRow};
use crate::models::resume::{GeneratedResumeRow, HrValidationRow};

/// Postgres-backed store. Replace operations lock the owning document row
/// with `SELECT ... FOR UPDATE` inside a transaction, and the UNIQUE
/// constraints on `hr_validations.resume_id` / `cover_letter_evaluations.cover_letter_id`
/// back the one-current-record rule.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row decoding
// ────────────────────────────────────────────────────────────────────────────

impl TryFrom<GeneratedResumeRow> for StoredResume {
    type Error = StoreError;

    fn try_from(row: GeneratedResumeRow) -> Result<Self, Self::Error> {
        Ok(StoredResume {
            id: row.id,
            owner_id: row.owner_id,
            jd_text: row.jd_text,
            source_texts: row.source_texts,
            content: decode(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<HrValidationRow> for StoredValidation {
    type Error = StoreError;

    fn try_from(row: HrValidationRow) -> Result<Self, Self::Error> {
        Ok(StoredValidation {
            id: row.id,
            resume_id: row.resume_id,
            validation: decode(row.content)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<GeneratedCoverLetterRow> for StoredCoverLetter {
    type Error = StoreError;

    fn try_from(row: GeneratedCoverLetterRow) -> Result<Self, Self::Error> {
        Ok(StoredCoverLetter {
            id: row.id,
            owner_id: row.owner_id,
            jd_text: row.jd_text,
            resume_text: row.resume_text,
            master_cover_letter_text: row.master_cover_letter_text,
            company_research: decode(row.company_research)?,
            content: decode(row.content)?,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<CoverLetterEvaluationRow> for StoredEvaluation {
    type Error = StoreError;

    fn try_from(row: CoverLetterEvaluationRow) -> Result<Self, Self::Error> {
        Ok(StoredEvaluation {
            id: row.id,
            cover_letter_id: row.cover_letter_id,
            evaluation: decode(row.content)?,
            created_at: row.created_at,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared statements (run inside a caller's transaction)
// ────────────────────────────────────────────────────────────────────────────

async fn insert_validation(
    conn: &mut PgConnection,
    resume_id: Uuid,
    validation: &HrValidation,
) -> Result<StoredValidation, StoreError> {
    let row: HrValidationRow = sqlx::query_as(
        r#"
        INSERT INTO hr_validations
            (id, resume_id, overall_score, keyword_match_score, experience_relevance_score,
             skills_alignment_score, resume_quality_score, education_fit_score, content)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, resume_id, content, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(validation.overall_score)
    .bind(validation.keyword_match_score)
    .bind(validation.experience_relevance_score)
    .bind(validation.skills_alignment_score)
    .bind(validation.resume_quality_score)
    .bind(validation.education_fit_score)
    .bind(encode(validation)?)
    .fetch_one(&mut *conn)
    .await?;

    row.try_into()
}

async fn insert_evaluation(
    conn: &mut PgConnection,
    cover_letter_id: Uuid,
    evaluation: &CoverLetterEvaluation,
) -> Result<StoredEvaluation, StoreError> {
    let row: CoverLetterEvaluationRow = sqlx::query_as(
        r#"
        INSERT INTO cover_letter_evaluations (id, cover_letter_id, match_percentage, content)
        VALUES ($1, $2, $3, $4)
        RETURNING id, cover_letter_id, content, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(cover_letter_id)
    .bind(evaluation.match_percentage)
    .bind(encode(evaluation)?)
    .fetch_one(&mut *conn)
    .await?;

    row.try_into()
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeStore
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert_resume(&self, new: NewResume) -> Result<ResumeWithValidation, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row: GeneratedResumeRow = sqlx::query_as(
            r#"
            INSERT INTO generated_resumes (id, owner_id, jd_text, source_texts, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.owner_id)
        .bind(&new.jd_text)
        .bind(&new.source_texts)
        .bind(encode(&new.content)?)
        .fetch_one(&mut *tx)
        .await?;

        let validation = match &new.validation {
            Some(v) => Some(insert_validation(&mut tx, row.id, v).await?),
            None => None,
        };

        tx.commit().await?;
        info!("Inserted resume {} for owner {}", row.id, row.owner_id);

        Ok(ResumeWithValidation {
            resume: row.try_into()?,
            validation,
        })
    }

    async fn find_resume(&self, id: Uuid, owner_id: Uuid) -> Result<Option<StoredResume>, StoreError> {
        let row: Option<GeneratedResumeRow> =
            sqlx::query_as("SELECT * FROM generated_resumes WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(StoredResume::try_from).transpose()
    }

    async fn replace_resume_run(
        &self,
        id: Uuid,
        owner_id: Uuid,
        content: ResumeDocument,
        validation: Option<HrValidation>,
    ) -> Result<Option<ResumeWithValidation>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM generated_resumes WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let row: GeneratedResumeRow = sqlx::query_as(
            "UPDATE generated_resumes SET content = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(encode(&content)?)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM hr_validations WHERE resume_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let validation = match &validation {
            Some(v) => Some(insert_validation(&mut tx, id, v).await?),
            None => None,
        };

        tx.commit().await?;
        info!(
            "Replaced resume {id} content (validation present: {})",
            validation.is_some()
        );

        Ok(Some(ResumeWithValidation {
            resume: row.try_into()?,
            validation,
        }))
    }

    async fn find_validation(&self, resume_id: Uuid) -> Result<Option<StoredValidation>, StoreError> {
        let row: Option<HrValidationRow> = sqlx::query_as(
            "SELECT id, resume_id, content, created_at FROM hr_validations WHERE resume_id = $1",
        )
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StoredValidation::try_from).transpose()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CoverLetterStore
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CoverLetterStore for PgStore {
    async fn insert_cover_letter(&self, new: NewCoverLetter) -> Result<StoredCoverLetter, StoreError> {
        let row: GeneratedCoverLetterRow = sqlx::query_as(
            r#"
            INSERT INTO generated_cover_letters
                (id, owner_id, jd_text, resume_text, master_cover_letter_text, company_research, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.owner_id)
        .bind(&new.jd_text)
        .bind(&new.resume_text)
        .bind(&new.master_cover_letter_text)
        .bind(encode(&new.company_research)?)
        .bind(encode(&new.content)?)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted cover letter {} for owner {}", row.id, row.owner_id);
        row.try_into()
    }

    async fn find_cover_letter(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<StoredCoverLetter>, StoreError> {
        let row: Option<GeneratedCoverLetterRow> =
            sqlx::query_as("SELECT * FROM generated_cover_letters WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(StoredCoverLetter::try_from).transpose()
    }

    async fn replace_evaluation(
        &self,
        cover_letter_id: Uuid,
        owner_id: Uuid,
        evaluation: CoverLetterEvaluation,
    ) -> Result<Option<StoredEvaluation>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM generated_cover_letters WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(cover_letter_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM cover_letter_evaluations WHERE cover_letter_id = $1")
            .bind(cover_letter_id)
            .execute(&mut *tx)
            .await?;

        let stored = insert_evaluation(&mut tx, cover_letter_id, &evaluation).await?;

        tx.commit().await?;
        info!("Replaced evaluation for cover letter {cover_letter_id}");
        Ok(Some(stored))
    }

    async fn find_evaluation(
        &self,
        cover_letter_id: Uuid,
    ) -> Result<Option<StoredEvaluation>, StoreError> {
        let row: Option<CoverLetterEvaluationRow> = sqlx::query_as(
            "SELECT id, cover_letter_id, content, created_at FROM cover_letter_evaluations WHERE cover_letter_id = $1",
        )
        .bind(cover_letter_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StoredEvaluation::try_from).transpose()
    }
}
