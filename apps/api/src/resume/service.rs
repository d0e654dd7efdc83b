//! Resume lifecycle: runs the pipeline and persists its result. A failed
//! content stage persists nothing; a successful regeneration replaces the
//! content and the validation together.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::contracts::resume::RenderableResume;
use crate::contracts::RecommendationItem;
use crate::errors::AppError;
use crate::resume::pipeline::{ResumePipeline, ResumeRun};
use crate::storage::{NewResume, ResumeStore, ResumeWithValidation, StoredResume};

pub struct ResumeService {
    pipeline: ResumePipeline,
    store: Arc<dyn ResumeStore>,
}

impl ResumeService {
    pub fn new(pipeline: ResumePipeline, store: Arc<dyn ResumeStore>) -> Self {
        Self { pipeline, store }
    }

    pub async fn generate(
        &self,
        owner_id: Uuid,
        resume_texts: Vec<String>,
        jd_text: String,
    ) -> Result<ResumeWithValidation, AppError> {
        if jd_text.trim().is_empty() {
            return Err(AppError::Validation("jd_text must not be blank".into()));
        }
        if resume_texts.iter().all(|t| t.trim().is_empty()) {
            return Err(AppError::Validation(
                "resume_texts must contain at least one non-blank text".into(),
            ));
        }

        let ResumeRun { resume, validation } =
            self.pipeline.generate(&resume_texts, &jd_text).await?;

        let stored = self
            .store
            .insert_resume(NewResume {
                owner_id,
                jd_text,
                source_texts: resume_texts,
                content: resume,
                validation,
            })
            .await?;
        info!(resume_id = %stored.resume.id, "Resume generated");
        Ok(stored)
    }

    pub async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<ResumeWithValidation, AppError> {
        let resume = self.load(id, owner_id).await?;
        let validation = self.store.find_validation(id).await?;
        Ok(ResumeWithValidation { resume, validation })
    }

    /// Re-runs fresh generation from the stored inputs.
    pub async fn regenerate(&self, id: Uuid, owner_id: Uuid) -> Result<ResumeWithValidation, AppError> {
        let current = self.load(id, owner_id).await?;
        let run = self
            .pipeline
            .generate(&current.source_texts, &current.jd_text)
            .await?;
        self.replace(id, owner_id, run).await
    }

    /// Regenerates with the selected recommendations applied. An empty
    /// selection is a plain regenerate.
    pub async fn apply_recommendations(
        &self,
        id: Uuid,
        owner_id: Uuid,
        recommendations: Vec<RecommendationItem>,
    ) -> Result<ResumeWithValidation, AppError> {
        if recommendations.is_empty() {
            return self.regenerate(id, owner_id).await;
        }

        let current = self.load(id, owner_id).await?;
        let run = self
            .pipeline
            .apply_recommendations(&current.content, &current.jd_text, &recommendations)
            .await?;
        self.replace(id, owner_id, run).await
    }

    /// Renderer-facing view of the stored resume.
    pub async fn render_view(&self, id: Uuid, owner_id: Uuid) -> Result<RenderableResume, AppError> {
        let resume = self.load(id, owner_id).await?;
        Ok(resume.content.to_render_view())
    }

    async fn load(&self, id: Uuid, owner_id: Uuid) -> Result<StoredResume, AppError> {
        self.store
            .find_resume(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
    }

    async fn replace(
        &self,
        id: Uuid,
        owner_id: Uuid,
        run: ResumeRun,
    ) -> Result<ResumeWithValidation, AppError> {
        self.store
            .replace_resume_run(id, owner_id, run.resume, run.validation)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
    }
}
