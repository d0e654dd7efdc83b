//! HrValidation: scoring of a generated resume against its job description,
//! with pinpointed recommendations that can be applied in a later pass.

use serde::{Deserialize, Serialize};

use super::resume::SectionName;
use super::{check_range, Contract, ContractError};

pub const SUB_SCORE_MAX: f64 = 1.0;
pub const OVERALL_SCORE_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Modify,
    Add,
    Remove,
}

/// A structured suggestion scoped to a section, an entry, or a single bullet.
///
/// `entry_index` / `bullet_index` of `None` target the enclosing section or
/// entry as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub section: SectionName,
    #[serde(default)]
    pub entry_index: Option<usize>,
    #[serde(default)]
    pub bullet_index: Option<usize>,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub suggested: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrValidation {
    /// Weighted composite computed by the model, 0.0 to 10.0.
    pub overall_score: f64,
    pub keyword_match_score: f64,
    pub experience_relevance_score: f64,
    pub skills_alignment_score: f64,
    pub resume_quality_score: f64,
    pub education_fit_score: f64,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
}

impl HrValidation {
    /// The five sub-scores with their wire names, in a fixed order.
    pub fn sub_scores(&self) -> [(&'static str, f64); 5] {
        [
            ("keywordMatchScore", self.keyword_match_score),
            ("experienceRelevanceScore", self.experience_relevance_score),
            ("skillsAlignmentScore", self.skills_alignment_score),
            ("resumeQualityScore", self.resume_quality_score),
            ("educationFitScore", self.education_fit_score),
        ]
    }
}

impl Contract for HrValidation {
    const NAME: &'static str = "HrValidation";

    fn normalize(&mut self) {
        for item in &mut self.recommendations {
            if item.kind == RecommendationType::Add {
                item.original = None;
            }
        }
    }

    fn validate(&self) -> Result<(), ContractError> {
        check_range(Self::NAME, "overallScore", self.overall_score, 0.0, OVERALL_SCORE_MAX)?;
        for (field, value) in self.sub_scores() {
            check_range(Self::NAME, field, value, 0.0, SUB_SCORE_MAX)?;
        }
        for (i, item) in self.recommendations.iter().enumerate() {
            if item.kind == RecommendationType::Add && item.original.is_some() {
                return Err(ContractError::new(
                    Self::NAME,
                    format!("recommendation {i} is an add but carries an original"),
                ));
            }
        }
        Ok(())
    }
}
