use serde::{Deserialize, Serialize};

use super::{check_range, Contract, ContractError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterEvaluation {
    /// 0 to 100
    pub match_percentage: f64,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Contract for CoverLetterEvaluation {
    const NAME: &'static str = "CoverLetterEvaluation";

    fn validate(&self) -> Result<(), ContractError> {
        check_range(Self::NAME, "matchPercentage", self.match_percentage, 0.0, 100.0)
    }
}
