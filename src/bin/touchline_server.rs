//! Runs the registration assistant HTTP server.
//!
//! Configuration is read from the environment; see [`touchline::config`].
//! Player records go to Airtable when `AIRTABLE_*` variables are set and to
//! an in-memory store otherwise.

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use touchline::config::{AppConfig, ConfigError};
use touchline::conversation::adapters::airtable::AirtableRecordStore;
use touchline::conversation::adapters::memory::{
    InMemoryParticipantRegistry, InMemoryRecordStore, InMemorySessionStore,
};
use touchline::conversation::adapters::openai::OpenAiInvoker;
use touchline::conversation::ports::invoker::InvocationError;
use touchline::conversation::ports::record_store::{RecordStore, RecordStoreError};
use touchline::conversation::ports::registry::{ParticipantRegistry, RegistryError};
use touchline::conversation::services::{ConversationService, RecordTools, TurnController};
use touchline::transport;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Error)]
enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("participant registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("language model client error: {0}")]
    Invoker(#[from] InvocationError),
    #[error("record store error: {0}")]
    RecordStore(#[from] RecordStoreError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "touchline=info,touchline_server=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;
    let registry = InMemoryParticipantRegistry::canonical()?;
    info!(participants = ?registry.names(), "participant registry loaded");

    if let Some(airtable) = config.airtable.as_ref() {
        info!(base_id = %airtable.base_id, table_id = %airtable.table_id, "using Airtable record store");
        let store = AirtableRecordStore::new(airtable)?;
        serve(config, registry, Arc::new(store)).await
    } else {
        warn!("Airtable credentials not configured; player records are kept in memory");
        serve(config, registry, Arc::new(InMemoryRecordStore::new())).await
    }
}

async fn serve<S: RecordStore + 'static>(
    config: AppConfig,
    registry: InMemoryParticipantRegistry,
    record_store: Arc<S>,
) -> Result<(), ServerError> {
    let invoker = OpenAiInvoker::new(&config.openai, RecordTools::new(record_store))?;
    let controller = TurnController::new(Arc::new(registry), Arc::new(invoker), config.turn);
    let service = ConversationService::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(controller),
        Arc::new(DefaultClock),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, model = %config.openai.model, "touchline listening");
    axum::serve(listener, transport::router(service)).await?;
    Ok(())
}
