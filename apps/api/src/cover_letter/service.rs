use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::cover_letter::pipeline::{CoverLetterPipeline, CoverLetterRun};
use crate::errors::AppError;
use crate::storage::{
    CoverLetterStore, NewCoverLetter, StoredCoverLetter, StoredEvaluation,
};

/// A stored cover letter with its current evaluation, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLetterWithEvaluation {
    pub letter: StoredCoverLetter,
    pub evaluation: Option<StoredEvaluation>,
}

pub struct CoverLetterService {
    pipeline: CoverLetterPipeline,
    store: Arc<dyn CoverLetterStore>,
}

impl CoverLetterService {
    pub fn new(pipeline: CoverLetterPipeline, store: Arc<dyn CoverLetterStore>) -> Self {
        Self { pipeline, store }
    }

    pub async fn generate(
        &self,
        owner_id: Uuid,
        resume_text: String,
        master_cover_letter_text: String,
        jd_text: String,
    ) -> Result<StoredCoverLetter, AppError> {
        for (field, value) in [
            ("resume_text", &resume_text),
            ("master_cover_letter_text", &master_cover_letter_text),
            ("jd_text", &jd_text),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} must not be blank")));
            }
        }

        let CoverLetterRun { research, letter } = self
            .pipeline
            .generate(&resume_text, &master_cover_letter_text, &jd_text)
            .await?;

        let stored = self
            .store
            .insert_cover_letter(NewCoverLetter {
                owner_id,
                jd_text,
                resume_text,
                master_cover_letter_text,
                company_research: research,
                content: letter,
            })
            .await?;
        info!(cover_letter_id = %stored.id, "Cover letter generated");
        Ok(stored)
    }

    pub async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<CoverLetterWithEvaluation, AppError> {
        let letter = self.load(id, owner_id).await?;
        let evaluation = self.store.find_evaluation(id).await?;
        Ok(CoverLetterWithEvaluation { letter, evaluation })
    }

    /// Evaluates the stored letter against its JD and replaces any previous
    /// evaluation. On failure the previous evaluation stays in place.
    pub async fn evaluate(&self, id: Uuid, owner_id: Uuid) -> Result<StoredEvaluation, AppError> {
        let letter = self.load(id, owner_id).await?;
        let evaluation = self
            .pipeline
            .evaluate(&letter.content, &letter.jd_text)
            .await?;

        let stored = self
            .store
            .replace_evaluation(id, owner_id, evaluation)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
        info!(
            cover_letter_id = %id,
            match_percentage = stored.evaluation.match_percentage,
            "Cover letter evaluated"
        );
        Ok(stored)
    }

    async fn load(&self, id: Uuid, owner_id: Uuid) -> Result<StoredCoverLetter, AppError> {
        self.store
            .find_cover_letter(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::capability::{CapabilityError, PromptId};
    use crate::storage::memory::MemoryStore;
    use crate::testing::{
        cover_letter_output, evaluation_output, research_output, ScriptedCapability, JD_TEXT,
    };

    struct Harness {
        service: Arc<CoverLetterService>,
        store: Arc<MemoryStore>,
        research: Arc<ScriptedCapability>,
    }

    fn harness(research: ScriptedCapability, evaluator: ScriptedCapability) -> Harness {
        let research = Arc::new(research);
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(CoverLetterService::new(
            CoverLetterPipeline::new(research.clone(), Arc::new(evaluator)),
            store.clone(),
        ));
        Harness {
            service,
            store,
            research,
        }
    }

    fn research_for(name: Option<&str>) -> ScriptedCapability {
        ScriptedCapability::new("research")
            .respond(PromptId::CompanyResearch, research_output(name))
            .respond(PromptId::CoverLetterGenerator, cover_letter_output())
    }

    async fn generate(h: &Harness, owner: Uuid) -> Result<StoredCoverLetter, AppError> {
        h.service
            .generate(
                owner,
                "Ada Lovelace resume text".into(),
                "Master letter text".into(),
                JD_TEXT.into(),
            )
            .await
    }

    #[tokio::test]
    async fn test_generate_persists_letter_with_research() {
        let h = harness(research_for(Some("Acme")), ScriptedCapability::new("secondary"));
        let owner = Uuid::new_v4();

        let stored = generate(&h, owner).await.unwrap();

        assert_eq!(stored.company_research.identified_company(), Some("Acme"));
        assert_eq!(stored.content.sign_off, "Ada Lovelace");
        assert_eq!(stored.master_cover_letter_text, "Master letter text");
        let fetched = h.service.get(stored.id, owner).await.unwrap();
        assert_eq!(fetched.letter, stored);
        assert!(fetched.evaluation.is_none());
    }

    #[tokio::test]
    async fn test_unidentified_company_persists_nothing() {
        let h = harness(research_for(Some("")), ScriptedCapability::new("secondary"));

        let err = generate(&h, Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::ServiceUnavailable(_)));
        assert_eq!(h.research.calls_for(PromptId::CoverLetterGenerator), 0);
        assert_eq!(h.store.cover_letter_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_master_letter_is_rejected() {
        let h = harness(research_for(Some("Acme")), ScriptedCapability::new("secondary"));
        let err = h
            .service
            .generate(Uuid::new_v4(), "resume".into(), "  ".into(), JD_TEXT.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("master_cover_letter_text")));
        assert_eq!(h.research.calls_for(PromptId::CompanyResearch), 0);
    }

    #[tokio::test]
    async fn test_evaluating_twice_keeps_one_evaluation() {
        let h = harness(
            research_for(Some("Acme")),
            ScriptedCapability::new("secondary")
                .respond(PromptId::CoverLetterEvaluator, evaluation_output(62.0))
                .respond(PromptId::CoverLetterEvaluator, evaluation_output(88.0)),
        );
        let owner = Uuid::new_v4();
        let letter = generate(&h, owner).await.unwrap();

        let first = h.service.evaluate(letter.id, owner).await.unwrap();
        let second = h.service.evaluate(letter.id, owner).await.unwrap();

        assert_eq!(first.evaluation.match_percentage, 62.0);
        assert_eq!(second.evaluation.match_percentage, 88.0);
        assert_eq!(h.store.evaluation_count(letter.id).await, 1);
        let current = h.service.get(letter.id, owner).await.unwrap();
        assert_eq!(current.evaluation, Some(second));
    }

    #[tokio::test]
    async fn test_failed_evaluation_keeps_previous_one() {
        let h = harness(
            research_for(Some("Acme")),
            ScriptedCapability::new("secondary")
                .respond(PromptId::CoverLetterEvaluator, evaluation_output(70.0))
                .fail(
                    PromptId::CoverLetterEvaluator,
                    CapabilityError::ServiceUnavailable("provider down".into()),
                ),
        );
        let owner = Uuid::new_v4();
        let letter = generate(&h, owner).await.unwrap();
        let first = h.service.evaluate(letter.id, owner).await.unwrap();

        let err = h.service.evaluate(letter.id, owner).await.unwrap_err();

        assert!(matches!(err, AppError::ServiceUnavailable(_)));
        let current = h.service.get(letter.id, owner).await.unwrap();
        assert_eq!(current.evaluation, Some(first));
    }

    #[tokio::test]
    async fn test_concurrent_evaluations_keep_one_evaluation() {
        let h = harness(
            research_for(Some("Acme")),
            ScriptedCapability::new("secondary")
                .respond(PromptId::CoverLetterEvaluator, evaluation_output(75.0))
                .with_latency(Duration::from_millis(5)),
        );
        let owner = Uuid::new_v4();
        let letter = generate(&h, owner).await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let service = h.service.clone();
            let id = letter.id;
            tasks.push(tokio::spawn(async move { service.evaluate(id, owner).await }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(h.store.evaluation_count(letter.id).await, 1);
    }

    #[tokio::test]
    async fn test_evaluate_unknown_letter_is_not_found() {
        let h = harness(research_for(Some("Acme")), ScriptedCapability::new("secondary"));
        let err = h
            .service
            .evaluate(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
