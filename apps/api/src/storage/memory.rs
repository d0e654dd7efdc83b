//! In-memory store for tests. A single mutex serializes every operation, which
//! makes each replace atomic. Scoring records live in plain `Vec`s so a test
//! can detect a duplicate "current" record if one ever appeared.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    CoverLetterStore, NewCoverLetter, NewResume, ResumeStore, ResumeWithValidation, StoreError,
    StoredCoverLetter, StoredEvaluation, StoredResume, StoredValidation,
};
use crate::contracts::{CoverLetterEvaluation, HrValidation, ResumeDocument};

#[derive(Default)]
struct Tables {
    resumes: Vec<StoredResume>,
    validations: Vec<StoredValidation>,
    cover_letters: Vec<StoredCoverLetter>,
    evaluations: Vec<StoredEvaluation>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn resume_count(&self) -> usize {
        self.tables.lock().await.resumes.len()
    }

    pub async fn validation_count(&self, resume_id: Uuid) -> usize {
        let tables = self.tables.lock().await;
        tables
            .validations
            .iter()
            .filter(|v| v.resume_id == resume_id)
            .count()
    }

    pub async fn cover_letter_count(&self) -> usize {
        self.tables.lock().await.cover_letters.len()
    }

    pub async fn evaluation_count(&self, cover_letter_id: Uuid) -> usize {
        let tables = self.tables.lock().await;
        tables
            .evaluations
            .iter()
            .filter(|e| e.cover_letter_id == cover_letter_id)
            .count()
    }
}

fn new_validation(resume_id: Uuid, validation: HrValidation) -> StoredValidation {
    StoredValidation {
        id: Uuid::new_v4(),
        resume_id,
        validation,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert_resume(&self, new: NewResume) -> Result<ResumeWithValidation, StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let resume = StoredResume {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            jd_text: new.jd_text,
            source_texts: new.source_texts,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        let validation = new.validation.map(|v| new_validation(resume.id, v));

        tables.resumes.push(resume.clone());
        if let Some(v) = &validation {
            tables.validations.push(v.clone());
        }
        Ok(ResumeWithValidation { resume, validation })
    }

    async fn find_resume(&self, id: Uuid, owner_id: Uuid) -> Result<Option<StoredResume>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .resumes
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }

    async fn replace_resume_run(
        &self,
        id: Uuid,
        owner_id: Uuid,
        content: ResumeDocument,
        validation: Option<HrValidation>,
    ) -> Result<Option<ResumeWithValidation>, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(resume) = tables
            .resumes
            .iter_mut()
            .find(|r| r.id == id && r.owner_id == owner_id)
        else {
            return Ok(None);
        };
        resume.content = content;
        resume.updated_at = Utc::now();
        let resume = resume.clone();

        tables.validations.retain(|v| v.resume_id != id);
        let validation = validation.map(|v| new_validation(id, v));
        if let Some(v) = &validation {
            tables.validations.push(v.clone());
        }
        Ok(Some(ResumeWithValidation { resume, validation }))
    }

    async fn find_validation(&self, resume_id: Uuid) -> Result<Option<StoredValidation>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .validations
            .iter()
            .find(|v| v.resume_id == resume_id)
            .cloned())
    }
}

#[async_trait]
impl CoverLetterStore for MemoryStore {
    async fn insert_cover_letter(&self, new: NewCoverLetter) -> Result<StoredCoverLetter, StoreError> {
        let mut tables = self.tables.lock().await;
        let letter = StoredCoverLetter {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            jd_text: new.jd_text,
            resume_text: new.resume_text,
            master_cover_letter_text: new.master_cover_letter_text,
            company_research: new.company_research,
            content: new.content,
            created_at: Utc::now(),
        };
        tables.cover_letters.push(letter.clone());
        Ok(letter)
    }

    async fn find_cover_letter(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<StoredCoverLetter>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .cover_letters
            .iter()
            .find(|c| c.id == id && c.owner_id == owner_id)
            .cloned())
    }

    async fn replace_evaluation(
        &self,
        cover_letter_id: Uuid,
        owner_id: Uuid,
        evaluation: CoverLetterEvaluation,
    ) -> Result<Option<StoredEvaluation>, StoreError> {
        let mut tables = self.tables.lock().await;
        let exists = tables
            .cover_letters
            .iter()
            .any(|c| c.id == cover_letter_id && c.owner_id == owner_id);
        if !exists {
            return Ok(None);
        }

        tables.evaluations.retain(|e| e.cover_letter_id != cover_letter_id);
        let stored = StoredEvaluation {
            id: Uuid::new_v4(),
            cover_letter_id,
            evaluation,
            created_at: Utc::now(),
        };
        tables.evaluations.push(stored.clone());
        Ok(Some(stored))
    }

    async fn find_evaluation(
        &self,
        cover_letter_id: Uuid,
    ) -> Result<Option<StoredEvaluation>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .evaluations
            .iter()
            .find(|e| e.cover_letter_id == cover_letter_id)
            .cloned())
    }
}
