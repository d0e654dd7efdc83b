//! Structured output contracts: the typed shapes exchanged between pipeline
//! stages and persisted by the lifecycle services.
//!
//! Every contract is camelCase JSON on the wire. That is the exact shape the
//! generation prompts ask the model to emit and the shape stored in Postgres.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub mod cover_letter;
pub mod evaluation;
pub mod hr_validation;
pub mod research;
pub mod resume;

pub use cover_letter::CoverLetterDocument;
pub use evaluation::CoverLetterEvaluation;
pub use hr_validation::{HrValidation, RecommendationItem, RecommendationType};
pub use research::CompanyResearch;
pub use resume::{ResumeDocument, SectionName};

/// A payload that violates the invariants of its contract.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{contract} violates its contract: {reason}")]
pub struct ContractError {
    pub contract: &'static str,
    pub reason: String,
}

impl ContractError {
    pub fn new(contract: &'static str, reason: impl Into<String>) -> Self {
        Self {
            contract,
            reason: reason.into(),
        }
    }
}

/// Implemented by every shape a generation capability can be coerced into.
///
/// `normalize` runs before `validate` and may only repair fields whose meaning
/// is unambiguous (e.g. dropping an `original` on an `add` recommendation).
pub trait Contract: Serialize + DeserializeOwned + Send + Sync + 'static {
    const NAME: &'static str;

    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), ContractError>;
}

/// Checks that `value` is a finite number inside `[min, max]`.
pub(crate) fn check_range(
    contract: &'static str,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ContractError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ContractError::new(
            contract,
            format!("{field} must be within [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}
