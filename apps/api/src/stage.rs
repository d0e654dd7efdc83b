//! Stage outcomes: every pipeline step is classified as `Ok`, `Degraded`
//! (a best-effort scoring stage failed) or `Fatal` (a content stage failed),
//! and orchestration branches on that tag explicitly.

use std::future::Future;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::capability::CapabilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Produces the primary document. Failure aborts the pipeline.
    Content,
    /// Scores a document. Failure is tolerated.
    Scoring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResumeGeneration,
    HrValidation,
    CompanyResearch,
    CoverLetterGeneration,
    CoverLetterEvaluation,
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::HrValidation | Stage::CoverLetterEvaluation => StageKind::Scoring,
            Stage::ResumeGeneration | Stage::CompanyResearch | Stage::CoverLetterGeneration => {
                StageKind::Content
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ResumeGeneration => "resume_generation",
            Stage::HrValidation => "hr_validation",
            Stage::CompanyResearch => "company_research",
            Stage::CoverLetterGeneration => "cover_letter_generation",
            Stage::CoverLetterEvaluation => "cover_letter_evaluation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("stage {stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: CapabilityError,
    },

    #[error("company research could not identify the hiring company")]
    CompanyNotIdentified,

    #[error("recommendation {index} cannot be applied: {reason}")]
    InvalidRecommendation { index: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Ok(T),
    Degraded { stage: Stage, error: CapabilityError },
    Fatal { stage: Stage, error: CapabilityError },
}

impl<T> StageOutcome<T> {
    /// The value of a stage the pipeline cannot continue without. Any failure,
    /// degraded or not, becomes an error.
    pub fn required(self) -> Result<T, PipelineError> {
        match self {
            StageOutcome::Ok(value) => Ok(value),
            StageOutcome::Degraded { stage, error } | StageOutcome::Fatal { stage, error } => {
                Err(PipelineError::Stage {
                    stage,
                    source: error,
                })
            }
        }
    }

    /// The value of a best-effort stage: degraded becomes `None`, fatal is
    /// still an error.
    pub fn optional(self) -> Result<Option<T>, PipelineError> {
        match self {
            StageOutcome::Ok(value) => Ok(Some(value)),
            StageOutcome::Degraded { .. } => Ok(None),
            StageOutcome::Fatal { stage, error } => Err(PipelineError::Stage {
                stage,
                source: error,
            }),
        }
    }
}

/// Runs one stage and classifies its result by the stage's kind.
pub async fn run_stage<T, F>(stage: Stage, fut: F) -> StageOutcome<T>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    info!(%stage, "Stage started");
    match fut.await {
        Ok(value) => {
            info!(%stage, "Stage completed");
            StageOutcome::Ok(value)
        }
        Err(error) => match stage.kind() {
            StageKind::Scoring => {
                warn!(%stage, "Scoring stage degraded: {error}");
                StageOutcome::Degraded { stage, error }
            }
            StageKind::Content => {
                error!(%stage, "Content stage failed: {error}");
                StageOutcome::Fatal { stage, error }
            }
        },
    }
}
