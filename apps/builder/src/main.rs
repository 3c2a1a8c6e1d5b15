mod config;
mod editors;
mod errors;
mod export;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod store;
mod suggestions;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{default_page_setup, HtmlFileExporter};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{SessionController, SharedSession};
use crate::state::AppState;
use crate::store::{FileStorage, RecordStore};
use crate::suggestions::LlmSuggester;

#[tokio::main]
async fn main() -> Result<()> {
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

    info!("Starting Resume Builder v{}", env!("CARGO_PKG_VERSION"));

    // Restore the persisted session
    let storage = FileStorage::open(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;
    let session = SharedSession::new(SessionController::open(RecordStore::open(storage)));
    info!("Data directory: {}", config.data_dir.display());

    // Initialize LLM client (suggestions disabled without a key)
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(LlmClient::new(key.clone()))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; suggestions are disabled");
            None
        }
    };

    let page = default_page_setup();
    info!(
        "Export page setup: {:?} {:?}, {}in margins, into {}",
        page.paper,
        page.orientation,
        page.margin_in,
        config.export_dir.display()
    );

    let state = AppState {
        session,
        suggester: Arc::new(LlmSuggester::new(llm)),
        exporter: Arc::new(HtmlFileExporter::new(config.export_dir.clone(), page)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
