use std::sync::Arc;
use anyhow::Context;
use kereta_api::{app, AppState};
use kereta_assistant::{ChatModel, GeminiClient};
use kereta_core::OrderRepository;
use kereta_store::app_config::Config;
use kereta_store::{InMemoryOrderRepository, InMemorySessionRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kereta_api=debug,kereta_assistant=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Kereta API on port {}", config.server.port);

    let orders: Arc<dyn OrderRepository> = if config.orders.seed_demo_order {
        Arc::new(InMemoryOrderRepository::with_demo_order())
    } else {
        Arc::new(InMemoryOrderRepository::new())
    };

    let model: Option<Arc<dyn ChatModel>> = match config.assistant.api_key {
        Some(_) => {
            let client = GeminiClient::new(&config.assistant).context("Failed to build model client")?;
            tracing::info!("Chat assistant enabled with model {}", config.assistant.model);
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; /api/chat will answer 503");
            None
        }
    };

    let state = AppState::new(
        orders,
        Arc::new(InMemorySessionRepository::new()),
        model,
        config.assistant.max_tool_rounds,
    );
    let app = app(state, &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
