use std::sync::Arc;

use support_chat::config::{ConfigError, ServerConfig};
use support_chat::document::{DocumentError, ReferenceDocument};
use support_chat::llm::LlmClient;
use support_chat::llm::types::LlmError;
use support_chat::{routes, state};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("LLM client: {0}")]
    Llm(#[from] LlmError),
    #[error("reference document: {0}")]
    Document(#[from] DocumentError),
    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "support-chat failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // Fatal: the endpoint is useless without a provider credential.
    let llm = LlmClient::from_env()?;
    tracing::info!(model = llm.model(), "LLM client initialized");

    let document = ReferenceDocument::load(&config.document_path)?;
    let state = state::AppState::new(Arc::new(llm), document, config.chat);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "support-chat listening");
    axum::serve(listener, app).await?;
    Ok(())
}
