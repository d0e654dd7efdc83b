//! ResumeDocument: the structured, ATS-oriented resume produced by the
//! resume generation stage and handed to external renderers.

use serde::{Deserialize, Serialize};

use super::{Contract, ContractError};

pub const BOLD_OPEN: &str = "<b>";
pub const BOLD_CLOSE: &str = "</b>";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

/// The four section kinds a generated resume may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionName {
    #[serde(alias = "education", alias = "Education")]
    Education,
    #[serde(alias = "experience", alias = "Experience")]
    Experience,
    #[serde(alias = "projects", alias = "Projects")]
    Projects,
    #[serde(alias = "skills", alias = "Skills")]
    Skills,
}

impl SectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Education => "EDUCATION",
            SectionName::Experience => "EXPERIENCE",
            SectionName::Projects => "PROJECTS",
            SectionName::Skills => "SKILLS",
        }
    }

    /// Human-readable heading used by renderers.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionName::Education => "Education",
            SectionName::Experience => "Experience",
            SectionName::Projects => "Projects",
            SectionName::Skills => "Technical Skills",
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionEntry {
    /// Job title, institution, project name or skill category.
    pub title: Option<String>,
    /// Company or degree. Empty for projects and skills.
    pub subtitle: Option<String>,
    pub location: Option<String>,
    pub date_range: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSection {
    #[serde(alias = "name")]
    pub section_name: SectionName,
    #[serde(default)]
    pub entries: Vec<SectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub sections: Vec<ResumeSection>,
}

impl Contract for ResumeDocument {
    const NAME: &'static str = "ResumeDocument";

    fn validate(&self) -> Result<(), ContractError> {
        if self.sections.is_empty() {
            return Err(ContractError::new(
                Self::NAME,
                "document must contain at least one section",
            ));
        }
        Ok(())
    }
}

impl ResumeDocument {
    /// Returns the first section with the given name, if present.
    pub fn section(&self, name: SectionName) -> Option<&ResumeSection> {
        self.sections.iter().find(|s| s.section_name == name)
    }

    /// File stem for downloads: the candidate's name reduced to alphanumerics,
    /// whitespace and hyphens, or `resume` when nothing usable is left.
    pub fn file_stem(&self) -> String {
        let sanitized: String = self
            .personal_info
            .full_name
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
            .collect();
        let sanitized = sanitized.trim();
        if sanitized.is_empty() {
            "resume".to_string()
        } else {
            sanitized.to_string()
        }
    }

    /// Builds the renderer-facing view, with every bullet split into text runs.
    pub fn to_render_view(&self) -> RenderableResume {
        RenderableResume {
            file_stem: self.file_stem(),
            personal_info: self.personal_info.clone(),
            sections: self
                .sections
                .iter()
                .map(|section| RenderableSection {
                    name: section.section_name,
                    heading: section.section_name.heading().to_string(),
                    entries: section
                        .entries
                        .iter()
                        .map(|entry| RenderableEntry {
                            title: entry.title.clone().unwrap_or_default(),
                            subtitle: entry.subtitle.clone().unwrap_or_default(),
                            location: entry.location.clone().unwrap_or_default(),
                            date_range: entry.date_range.clone().unwrap_or_default(),
                            bullets: entry.bullets.iter().map(|b| parse_bold_spans(b)).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer boundary
// ────────────────────────────────────────────────────────────────────────────

/// A contiguous run of bullet text with a single weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderableEntry {
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub date_range: String,
    pub bullets: Vec<Vec<TextRun>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderableSection {
    pub name: SectionName,
    pub heading: String,
    pub entries: Vec<RenderableEntry>,
}

/// Ordering-stable, format-agnostic resume view handed to document renderers.
#[derive(Debug, Clone, Serialize)]
pub struct RenderableResume {
    pub file_stem: String,
    pub personal_info: PersonalInfo,
    pub sections: Vec<RenderableSection>,
}

/// Splits a bullet on `<b>`/`</b>` markers into ordered runs.
///
/// Markers toggle weight; an unclosed `<b>` bolds the rest of the bullet and a
/// stray `</b>` is dropped. Empty runs are never emitted.
pub fn parse_bold_spans(bullet: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut bold = false;
    let mut rest = bullet;

    loop {
        let next_open = rest.find(BOLD_OPEN);
        let next_close = rest.find(BOLD_CLOSE);
        let (idx, marker_len, opens) = match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => (o, BOLD_OPEN.len(), true),
            (Some(_), Some(c)) => (c, BOLD_CLOSE.len(), false),
            (Some(o), None) => (o, BOLD_OPEN.len(), true),
            (None, Some(c)) => (c, BOLD_CLOSE.len(), false),
            (None, None) => break,
        };

        push_run(&mut runs, &rest[..idx], bold);
        bold = opens;
        rest = &rest[idx + marker_len..];
    }

    push_run(&mut runs, rest, bold);
    runs
}

fn push_run(runs: &mut Vec<TextRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => runs.push(TextRun {
            text: text.to_string(),
            bold,
        }),
    }
}
