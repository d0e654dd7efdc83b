use serde::{Deserialize, Serialize};

use super::{Contract, ContractError};

/// Company facts gathered by the research stage from web search.
///
/// A missing or blank `company_name` is not a coercion failure: the cover
/// letter pipeline inspects it and aborts on its own terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyResearch {
    pub company_name: Option<String>,
    pub company_domain: Option<String>,
    pub youtube_videos: Vec<String>,
    pub engineering_blogs: Vec<String>,
    pub products: Vec<String>,
    pub services: Vec<String>,
    pub tech_stack: Vec<String>,
    pub summary: Option<String>,
}

impl CompanyResearch {
    /// The trimmed company name, or `None` when the company was not identified.
    pub fn identified_company(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl Contract for CompanyResearch {
    const NAME: &'static str = "CompanyResearch";

    fn validate(&self) -> Result<(), ContractError> {
        Ok(())
    }
}
