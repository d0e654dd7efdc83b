use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{prompts::JSON_ONLY, CapabilityError, GenerationCapability, PromptId};
use crate::llm_client::web_search::WebSearchTool;
use crate::llm_client::LlmClient;

fn system_message(prompt: PromptId) -> String {
    format!("{}\n{}", prompt.system_prompt(), JSON_ONLY)
}

/// Plain chat-completion capability. Used for the primary (resume generation)
/// and secondary (HR validation, cover letter evaluation) instances.
pub struct LlmCapability {
    label: String,
    client: LlmClient,
}

impl LlmCapability {
    pub fn new(label: impl Into<String>, client: LlmClient) -> Self {
        Self {
            label: label.into(),
            client,
        }
    }
}

#[async_trait]
impl GenerationCapability for LlmCapability {
    fn name(&self) -> &str {
        &self.label
    }

    async fn complete(&self, prompt: PromptId, input: &Value) -> Result<String, CapabilityError> {
        debug!(capability = %self.label, model = self.client.model(), %prompt, "Invoking capability");
        let text = self
            .client
            .complete(&system_message(prompt), &input.to_string())
            .await?;
        Ok(text)
    }
}

/// Research-augmented capability: the model may call `web_search` for a
/// bounded number of rounds before answering.
pub struct ResearchCapability {
    client: LlmClient,
    search: WebSearchTool,
    max_tool_rounds: u32,
}

impl ResearchCapability {
    pub fn new(client: LlmClient, search: WebSearchTool, max_tool_rounds: u32) -> Self {
        Self {
            client,
            search,
            max_tool_rounds,
        }
    }
}

#[async_trait]
impl GenerationCapability for ResearchCapability {
    fn name(&self) -> &str {
        "research"
    }

    async fn complete(&self, prompt: PromptId, input: &Value) -> Result<String, CapabilityError> {
        debug!(capability = "research", model = self.client.model(), %prompt, "Invoking capability");
        let text = self
            .client
            .complete_with_tools(
                &system_message(prompt),
                &input.to_string(),
                &self.search,
                self.max_tool_rounds,
            )
            .await?;
        Ok(text)
    }
}
