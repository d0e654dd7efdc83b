use serde::{Deserialize, Serialize};

use super::{Contract, ContractError};

/// A tailored cover letter that keeps the structure of the candidate's master
/// letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterDocument {
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub closing: String,
    #[serde(default)]
    pub sign_off: String,
}

impl Contract for CoverLetterDocument {
    const NAME: &'static str = "CoverLetterDocument";

    fn validate(&self) -> Result<(), ContractError> {
        if self.paragraphs.iter().all(|p| p.trim().is_empty()) {
            return Err(ContractError::new(
                Self::NAME,
                "cover letter must contain at least one paragraph",
            ));
        }
        Ok(())
    }
}
