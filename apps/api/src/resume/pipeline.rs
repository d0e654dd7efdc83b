//! Resume Pipeline: resume generation (fatal) followed by HR validation
//! (best-effort), plus the recommendation-feedback regeneration pass.
//!
//! The pipeline holds no state between runs and never touches storage; the
//! lifecycle service decides what gets persisted.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::capability::{invoke, GenerationCapability, PromptId};
use crate::contracts::{HrValidation, RecommendationItem, ResumeDocument};
use crate::resume::recommendations::check_recommendations;
use crate::stage::{run_stage, PipelineError, Stage};

/// The outcome of one successful run: the resume is always present, the
/// validation only if the scoring stage succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeRun {
    pub resume: ResumeDocument,
    pub validation: Option<HrValidation>,
}

pub struct ResumePipeline {
    generator: Arc<dyn GenerationCapability>,
    validator: Arc<dyn GenerationCapability>,
}

impl ResumePipeline {
    pub fn new(
        generator: Arc<dyn GenerationCapability>,
        validator: Arc<dyn GenerationCapability>,
    ) -> Self {
        Self {
            generator,
            validator,
        }
    }

    /// Fresh generation from raw candidate texts.
    pub async fn generate(
        &self,
        resume_texts: &[String],
        jd_text: &str,
    ) -> Result<ResumeRun, PipelineError> {
        let input = json!({ "resumeTexts": resume_texts, "jdText": jd_text });
        let outcome = run_stage(
            Stage::ResumeGeneration,
            invoke::<ResumeDocument>(self.generator.as_ref(), PromptId::ResumeGenerator, &input),
        )
        .await;
        let resume = outcome.required()?;

        self.finish(resume, jd_text).await
    }

    /// Regenerates `current` with only the selected recommendations applied.
    /// Recommendations are checked against `current` first; an unresolvable
    /// one aborts the run before any generation call.
    pub async fn apply_recommendations(
        &self,
        current: &ResumeDocument,
        jd_text: &str,
        recommendations: &[RecommendationItem],
    ) -> Result<ResumeRun, PipelineError> {
        check_recommendations(current, recommendations)?;
        info!(
            count = recommendations.len(),
            "Applying recommendations to resume"
        );

        let input = json!({
            "currentResume": current,
            "jdText": jd_text,
            "recommendationsToApply": recommendations,
        });
        let outcome = run_stage(
            Stage::ResumeGeneration,
            invoke::<ResumeDocument>(self.generator.as_ref(), PromptId::ResumeGenerator, &input),
        )
        .await;
        let resume = outcome.required()?;

        self.finish(resume, jd_text).await
    }

    async fn finish(&self, resume: ResumeDocument, jd_text: &str) -> Result<ResumeRun, PipelineError> {
        let input = json!({ "resumeContent": &resume, "jdText": jd_text });
        let validation = run_stage(
            Stage::HrValidation,
            invoke::<HrValidation>(self.validator.as_ref(), PromptId::HrValidator, &input),
        )
        .await
        .optional()?;

        Ok(ResumeRun { resume, validation })
    }
}
