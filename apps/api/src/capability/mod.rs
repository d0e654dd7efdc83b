//! Generation Capability: "invoke a generative text service with a JSON
//! payload and a named prompt, get back one of the contracts, or fail."
//!
//! Pipelines hold capabilities as `Arc<dyn GenerationCapability>` and never
//! see the LLM client. Coercion of raw text into a contract is a separate,
//! pure step (`coerce`) so it can be tested without a model.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::contracts::{Contract, ContractError};
use crate::llm_client::{strip_json_fences, LlmError};

pub mod openai;
pub mod prompts;

pub use openai::{LlmCapability, ResearchCapability};

// ────────────────────────────────────────────────────────────────────────────
// Prompt ids
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    ResumeGenerator,
    HrValidator,
    CompanyResearch,
    CoverLetterGenerator,
    CoverLetterEvaluator,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptId::ResumeGenerator => "resume-generator",
            PromptId::HrValidator => "hr-validator",
            PromptId::CompanyResearch => "company-research",
            PromptId::CoverLetterGenerator => "cover-letter-generator",
            PromptId::CoverLetterEvaluator => "cover-letter-evaluator",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptId::ResumeGenerator => prompts::RESUME_GENERATOR_SYSTEM,
            PromptId::HrValidator => prompts::HR_VALIDATOR_SYSTEM,
            PromptId::CompanyResearch => prompts::COMPANY_RESEARCH_SYSTEM,
            PromptId::CoverLetterGenerator => prompts::COVER_LETTER_GENERATOR_SYSTEM,
            PromptId::CoverLetterEvaluator => prompts::COVER_LETTER_EVALUATOR_SYSTEM,
        }
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapabilityError {
    /// Transport or provider failure, including timeouts and exhausted retries.
    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The model answered but its output could not be coerced into the contract.
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

impl From<LlmError> for CapabilityError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::EmptyContent | LlmError::ToolLoopExhausted { .. } | LlmError::Parse(_) => {
                CapabilityError::GenerationFailed(e.to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::RateLimited { .. } | LlmError::Tool(_) => {
                CapabilityError::ServiceUnavailable(e.to_string())
            }
        }
    }
}

impl From<ContractError> for CapabilityError {
    fn from(e: ContractError) -> Self {
        CapabilityError::GenerationFailed(e.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A configured generative text service. Implementations differ only in model,
/// temperature and whether web search is available.
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    /// Short label for logs ("primary", "secondary", "research").
    fn name(&self) -> &str;

    /// Sends `input` under the system prompt of `prompt` and returns the raw
    /// model text.
    async fn complete(&self, prompt: PromptId, input: &Value) -> Result<String, CapabilityError>;
}

/// Invokes `capability` and coerces the answer into `T`.
pub async fn invoke<T: Contract>(
    capability: &dyn GenerationCapability,
    prompt: PromptId,
    input: &Value,
) -> Result<T, CapabilityError> {
    let raw = capability.complete(prompt, input).await?;
    coerce::<T>(&raw)
}

/// strip fences → deserialize → normalize → validate.
pub fn coerce<T: Contract>(raw: &str) -> Result<T, CapabilityError> {
    let json = strip_json_fences(raw);
    let mut value: T = serde_json::from_str(json).map_err(|e| {
        CapabilityError::GenerationFailed(format!("{} is not valid JSON for its schema: {e}", T::NAME))
    })?;
    value.normalize();
    value.validate()?;
    Ok(value)
}
