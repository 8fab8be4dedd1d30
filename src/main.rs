//! Concierge server binary.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use concierge::adapters::http::{self, ChatAppState};
use concierge::adapters::{
    AssistantStack, ChuckNorrisJokes, InMemoryDialogueStore, WeatherCompanyService,
    WikipediaSearch,
};
use concierge::application::{ChatServices, HandleMessageHandler, WeatherDialogue};
use concierge::config::AppConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Concierge starting"
    );

    let handler = build_handler(&config)?;
    let app = http::app(ChatAppState::new(handler), &config.server);

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_handler(config: &AppConfig) -> Result<HandleMessageHandler, BoxError> {
    let assistants = AssistantStack::from_config(&config.assistants)?;

    let weather = WeatherDialogue::new(
        Arc::new(WeatherCompanyService::from_config(&config.weather)?),
        config.weather.unit_system(),
    )
    .with_default_location(config.weather.default_location.clone());

    let services = ChatServices {
        assistant: assistants.router,
        knowledge_base: assistants.secondary,
        store: Arc::new(InMemoryDialogueStore::with_idle_timeout(
            config.dialogue.idle_timeout(),
        )),
        weather,
        jokes: Arc::new(ChuckNorrisJokes::from_config(&config.jokes)?),
        encyclopedia: Arc::new(WikipediaSearch::from_config(&config.encyclopedia)?),
    };

    Ok(HandleMessageHandler::new(services, config.dialogue.clone()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
