//! Cover Letter Pipeline: company research, then letter generation, both on
//! the research-augmented capability. Evaluation runs independently on the
//! secondary capability.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::capability::{invoke, GenerationCapability, PromptId};
use crate::contracts::{CompanyResearch, CoverLetterDocument, CoverLetterEvaluation};
use crate::stage::{run_stage, PipelineError, Stage};

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterRun {
    pub research: CompanyResearch,
    pub letter: CoverLetterDocument,
}

pub struct CoverLetterPipeline {
    research: Arc<dyn GenerationCapability>,
    evaluator: Arc<dyn GenerationCapability>,
}

impl CoverLetterPipeline {
    pub fn new(
        research: Arc<dyn GenerationCapability>,
        evaluator: Arc<dyn GenerationCapability>,
    ) -> Self {
        Self {
            research,
            evaluator,
        }
    }

    pub async fn generate(
        &self,
        resume_text: &str,
        master_cover_letter_text: &str,
        jd_text: &str,
    ) -> Result<CoverLetterRun, PipelineError> {
        let research_input = json!({ "jdText": jd_text });
        let research = run_stage(
            Stage::CompanyResearch,
            invoke::<CompanyResearch>(
                self.research.as_ref(),
                PromptId::CompanyResearch,
                &research_input,
            ),
        )
        .await
        .required()?;

        let Some(company) = research.identified_company() else {
            warn!("Company research returned no company name; aborting cover letter");
            return Err(PipelineError::CompanyNotIdentified);
        };
        info!(company, "Company identified");

        let letter_input = json!({
            "resumeText": resume_text,
            "masterCoverLetterText": master_cover_letter_text,
            "companyResearch": &research,
            "jdText": jd_text,
        });
        let letter = run_stage(
            Stage::CoverLetterGeneration,
            invoke::<CoverLetterDocument>(
                self.research.as_ref(),
                PromptId::CoverLetterGenerator,
                &letter_input,
            ),
        )
        .await
        .required()?;

        Ok(CoverLetterRun { research, letter })
    }

    /// Scores a stored letter. Callers asked for this explicitly, so a failure
    /// is surfaced rather than degraded to nothing.
    pub async fn evaluate(
        &self,
        letter: &CoverLetterDocument,
        jd_text: &str,
    ) -> Result<CoverLetterEvaluation, PipelineError> {
        let input = json!({ "coverLetterContent": letter, "jdText": jd_text });
        run_stage(
            Stage::CoverLetterEvaluation,
            invoke::<CoverLetterEvaluation>(
                self.evaluator.as_ref(),
                PromptId::CoverLetterEvaluator,
                &input,
            ),
        )
        .await
        .required()
    }
}
