//! `web_search` tool backed by the Tavily search API. Handed to the
//! research-augmented capability so the model can look up company facts.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::{LlmError, ToolDefinition, ToolExecutor};

pub const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
pub const TOOL_NAME: &str = "web_search";

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Clone)]
pub struct WebSearchTool {
    client: Client,
    api_key: String,
    endpoint: String,
    max_results: u32,
}

impl WebSearchTool {
    pub fn new(client: Client, api_key: String, max_results: u32) -> Self {
        Self {
            client,
            api_key,
            endpoint: TAVILY_SEARCH_URL.to_string(),
            max_results,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results: self.max_results,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TavilyResponse = response.json().await?;
        info!(query, hits = body.results.len(), "Web search completed");
        Ok(body.results)
    }
}

#[async_trait]
impl ToolExecutor for WebSearchTool {
    fn definitions(&self) -> Vec<ToolDefinition> {
        vec![ToolDefinition::function(
            TOOL_NAME,
            "Search the web. Use it to find a company's official website, products, \
             services, tech stack, engineering blog posts and YouTube videos.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "The search query"}
                },
                "required": ["query"]
            }),
        )]
    }

    async fn execute(&self, name: &str, arguments: &str) -> Result<String, LlmError> {
        if name != TOOL_NAME {
            return Err(LlmError::Tool(format!("unknown tool '{name}'")));
        }
        let args: WebSearchArgs = serde_json::from_str(arguments)
            .map_err(|e| LlmError::Tool(format!("invalid {TOOL_NAME} arguments: {e}")))?;
        let hits = self.search(&args.query).await?;
        Ok(serde_json::to_string(&hits)?)
    }
}
