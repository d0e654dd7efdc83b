use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

/// Model identity and sampling temperature of one capability instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub tavily_api_key: String,
    /// Resume generation.
    pub primary: ModelConfig,
    /// HR validation and cover letter evaluation.
    pub secondary: ModelConfig,
    /// Company research and cover letter generation, with web search.
    pub research: ModelConfig,
    pub llm_timeout: Duration,
    pub research_max_tool_rounds: u32,
    pub web_search_max_results: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_BASE_URL.to_string())?,
            tavily_api_key: require_env("TAVILY_API_KEY")?,
            primary: ModelConfig {
                model: optional_env("PRIMARY_MODEL", "gpt-4o".to_string())?,
                temperature: optional_env("PRIMARY_TEMPERATURE", 0.5)?,
            },
            secondary: ModelConfig {
                model: optional_env("SECONDARY_MODEL", "gpt-4o-mini".to_string())?,
                temperature: optional_env("SECONDARY_TEMPERATURE", 0.5)?,
            },
            research: ModelConfig {
                model: optional_env("RESEARCH_MODEL", "gpt-4o".to_string())?,
                temperature: optional_env("RESEARCH_TEMPERATURE", 0.3)?,
            },
            llm_timeout: Duration::from_secs(optional_env("LLM_TIMEOUT_SECS", 120)?),
            research_max_tool_rounds: optional_env("RESEARCH_MAX_TOOL_ROUNDS", 4)?,
            web_search_max_results: optional_env("WEB_SEARCH_MAX_RESULTS", 5)?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}
