//! Test doubles shared by pipeline, service and router tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::capability::{CapabilityError, GenerationCapability, PromptId};

/// A capability that answers each prompt from a script. When several answers
/// are queued for a prompt they are returned in order and the last one
/// repeats. Every call is recorded with its input payload.
pub struct ScriptedCapability {
    label: String,
    script: Mutex<HashMap<PromptId, VecDeque<Result<String, CapabilityError>>>>,
    calls: Mutex<Vec<(PromptId, Value)>>,
    latency: Option<Duration>,
}

impl ScriptedCapability {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    pub fn respond(self, prompt: PromptId, output: Value) -> Self {
        self.respond_raw(prompt, &output.to_string())
    }

    pub fn respond_raw(self, prompt: PromptId, raw: &str) -> Self {
        self.push(prompt, Ok(raw.to_string()))
    }

    pub fn fail(self, prompt: PromptId, error: CapabilityError) -> Self {
        self.push(prompt, Err(error))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn push(self, prompt: PromptId, answer: Result<String, CapabilityError>) -> Self {
        self.script
            .lock()
            .unwrap()
            .entry(prompt)
            .or_default()
            .push_back(answer);
        self
    }

    pub fn calls_for(&self, prompt: PromptId) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == prompt)
            .count()
    }

    pub fn inputs_for(&self, prompt: PromptId) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == prompt)
            .map(|(_, input)| input.clone())
            .collect()
    }

    fn next_answer(&self, prompt: PromptId) -> Result<String, CapabilityError> {
        let mut script = self.script.lock().unwrap();
        let queue = script.entry(prompt).or_default();
        let answer = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        answer.unwrap_or_else(|| {
            Err(CapabilityError::GenerationFailed(format!(
                "no scripted answer for {prompt}"
            )))
        })
    }
}

#[async_trait]
impl GenerationCapability for ScriptedCapability {
    fn name(&self) -> &str {
        &self.label
    }

    async fn complete(&self, prompt: PromptId, input: &Value) -> Result<String, CapabilityError> {
        self.calls.lock().unwrap().push((prompt, input.clone()));
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.next_answer(prompt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixtures (model output as the prompts ask for it)
// ────────────────────────────────────────────────────────────────────────────

pub fn resume_output() -> Value {
    json!({
        "personalInfo": {
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "location": "London, UK"
        },
        "sections": [
            {
                "sectionName": "EXPERIENCE",
                "entries": [
                    {
                        "title": "Senior Engineer",
                        "subtitle": "Analytical Engines Ltd",
                        "dateRange": "2019 - Present",
                        "bullets": [
                            "Cut batch latency by <b>40%</b> with a streaming rewrite",
                            "Worked on backend services"
                        ]
                    }
                ]
            },
            {
                "sectionName": "SKILLS",
                "entries": [{"title": "Languages", "bullets": ["Rust, Go, SQL"]}]
            }
        ]
    })
}

/// Same candidate after a recommendation pass.
pub fn revised_resume_output() -> Value {
    let mut revised = resume_output();
    revised["sections"][0]["entries"][0]["bullets"][1] =
        json!("Built a <b>Rust</b> ingestion service handling 2M events/day");
    revised
}

pub fn validation_output() -> Value {
    json!({
        "overallScore": 7.2,
        "keywordMatchScore": 0.8,
        "experienceRelevanceScore": 0.7,
        "skillsAlignmentScore": 0.9,
        "resumeQualityScore": 0.6,
        "educationFitScore": 0.5,
        "gaps": ["No Kubernetes exposure"],
        "strengths": ["Strong Rust background"],
        "recommendations": [
            {
                "section": "EXPERIENCE",
                "entryIndex": 0,
                "bulletIndex": 1,
                "type": "modify",
                "original": "Worked on backend services",
                "suggested": "Built a <b>Rust</b> ingestion service handling 2M events/day",
                "reason": "Quantify impact and surface the primary language"
            }
        ]
    })
}

pub fn research_output(company_name: Option<&str>) -> Value {
    json!({
        "companyName": company_name,
        "companyDomain": "acme.dev",
        "youtubeVideos": [],
        "engineeringBlogs": ["https://acme.dev/blog/rust-at-acme"],
        "products": ["Acme Cloud"],
        "services": [],
        "techStack": ["Rust", "Postgres"],
        "summary": "Acme builds developer infrastructure."
    })
}

pub fn cover_letter_output() -> Value {
    json!({
        "greeting": "Dear Acme Hiring Team,",
        "paragraphs": [
            "I am excited to apply for the Senior Rust Engineer role.",
            "At Analytical Engines I cut batch latency by 40%."
        ],
        "closing": "I would welcome the chance to talk.",
        "signOff": "Ada Lovelace"
    })
}

pub fn evaluation_output(match_percentage: f64) -> Value {
    json!({
        "matchPercentage": match_percentage,
        "verdict": "Strong alignment with the role",
        "suggestions": ["Mention Acme Cloud by name"]
    })
}

pub const JD_TEXT: &str = "Acme is hiring a Senior Rust Engineer to build ingestion pipelines.";
