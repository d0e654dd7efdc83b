//! Pre-flight check of caller-selected recommendations against the stored
//! resume. A recommendation whose indices do not resolve is rejected before
//! any generation call is made.
//!
//! Index rules (all zero-based, all relative to the same stored document):
//! - `modify` / `remove` address existing items: the section must exist, and
//!   `entryIndex` / `bulletIndex`, when given, must be in bounds.
//! - `add` indices are insert positions: `entryIndex <= entries.len()` (a
//!   missing section counts as empty), and a bullet add needs an existing
//!   entry with `bulletIndex <= bullets.len()`. An `add` never carries an
//!   `original`.
//! - `bulletIndex` without `entryIndex` is never valid.

use crate::contracts::{RecommendationItem, RecommendationType, ResumeDocument};
use crate::stage::PipelineError;

pub fn check_recommendations(
    doc: &ResumeDocument,
    recommendations: &[RecommendationItem],
) -> Result<(), PipelineError> {
    for (index, item) in recommendations.iter().enumerate() {
        check_one(doc, item).map_err(|reason| PipelineError::InvalidRecommendation { index, reason })?;
    }
    Ok(())
}

fn check_one(doc: &ResumeDocument, item: &RecommendationItem) -> Result<(), String> {
    if item.bullet_index.is_some() && item.entry_index.is_none() {
        return Err("bulletIndex requires an entryIndex".to_string());
    }

    let section = doc.section(item.section);
    let entries = section.map(|s| s.entries.as_slice()).unwrap_or_default();

    match item.kind {
        RecommendationType::Modify | RecommendationType::Remove => {
            if section.is_none() {
                return Err(format!("section {} does not exist", item.section));
            }
            let Some(entry_index) = item.entry_index else {
                return Ok(());
            };
            let entry = entries.get(entry_index).ok_or_else(|| {
                format!(
                    "entryIndex {entry_index} is out of range for {} ({} entries)",
                    item.section,
                    entries.len()
                )
            })?;
            match item.bullet_index {
                Some(bullet_index) if bullet_index >= entry.bullets.len() => Err(format!(
                    "bulletIndex {bullet_index} is out of range ({} bullets)",
                    entry.bullets.len()
                )),
                _ => Ok(()),
            }
        }
        RecommendationType::Add => {
            if item.original.is_some() {
                return Err("an add recommendation cannot carry an original".to_string());
            }
            match (item.entry_index, item.bullet_index) {
                (None, _) => Ok(()),
                (Some(entry_index), None) if entry_index <= entries.len() => Ok(()),
                (Some(entry_index), None) => Err(format!(
                    "entryIndex {entry_index} is past the end of {} ({} entries)",
                    item.section,
                    entries.len()
                )),
                (Some(entry_index), Some(bullet_index)) => {
                    let entry = entries.get(entry_index).ok_or_else(|| {
                        format!(
                            "entryIndex {entry_index} is out of range for {} ({} entries)",
                            item.section,
                            entries.len()
                        )
                    })?;
                    if bullet_index > entry.bullets.len() {
                        return Err(format!(
                            "bulletIndex {bullet_index} is past the end of the entry ({} bullets)",
                            entry.bullets.len()
                        ));
                    }
                    Ok(())
                }
            }
        }
    }
}
