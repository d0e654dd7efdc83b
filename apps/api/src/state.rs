use std::sync::Arc;

use crate::cover_letter::CoverLetterService;
use crate::resume::ResumeService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Services own their pipelines and stores; handlers never see either.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<ResumeService>,
    pub cover_letters: Arc<CoverLetterService>,
}
