mod capability;
mod config;
mod contracts;
mod cover_letter;
mod db;
mod errors;
mod llm_client;
mod models;
mod resume;
mod routes;
mod stage;
mod state;
mod storage;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::capability::{GenerationCapability, LlmCapability, ResearchCapability};
use crate::config::{Config, ModelConfig};
use crate::cover_letter::{CoverLetterPipeline, CoverLetterService};
use crate::db::create_pool;
use crate::llm_client::web_search::WebSearchTool;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::resume::{ResumePipeline, ResumeService};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (pool + migrations)
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize the three capability instances
    let primary: Arc<dyn GenerationCapability> = Arc::new(LlmCapability::new(
        "primary",
        llm_client(&config, &config.primary)?,
    ));
    let secondary: Arc<dyn GenerationCapability> = Arc::new(LlmCapability::new(
        "secondary",
        llm_client(&config, &config.secondary)?,
    ));
    let web_search = WebSearchTool::new(
        reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()?,
        config.tavily_api_key.clone(),
        config.web_search_max_results,
    );
    let research: Arc<dyn GenerationCapability> = Arc::new(ResearchCapability::new(
        llm_client(&config, &config.research)?,
        web_search,
        config.research_max_tool_rounds,
    ));
    info!(
        "Capabilities initialized (primary: {}, secondary: {}, research: {})",
        config.primary.model, config.secondary.model, config.research.model
    );

    // Build app state
    let state = AppState {
        resumes: Arc::new(ResumeService::new(
            ResumePipeline::new(primary, secondary.clone()),
            store.clone(),
        )),
        cover_letters: Arc::new(CoverLetterService::new(
            CoverLetterPipeline::new(research, secondary),
            store,
        )),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn llm_client(config: &Config, model: &ModelConfig) -> Result<LlmClient> {
    Ok(LlmClient::new(LlmSettings {
        api_key: config.openai_api_key.clone(),
        base_url: config.openai_base_url.clone(),
        model: model.model.clone(),
        temperature: model.temperature,
        timeout: config.llm_timeout,
    })?)
}
