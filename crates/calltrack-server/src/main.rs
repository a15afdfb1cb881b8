use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calltrack::CallRepository;
use calltrack_server::{
    adapters::{bundled_seed, load_seed_file, InMemoryCallRepository, JsonFileCallRepository},
    build_router,
    config::{ServerConfig, Storage},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "calltrack_server=debug,calltrack=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!("📞 Calltrack API initializing...");

    let repo: Arc<dyn CallRepository> = match &config.storage {
        Storage::JsonFile { path } => {
            tracing::info!("💾 Using JSON file store {:?}", path);
            Arc::new(JsonFileCallRepository::open(path).await?)
        }
        Storage::Memory { seed_file } => {
            let calls = match seed_file {
                Some(path) => load_seed_file(path).await?,
                None => {
                    tracing::info!("🌱 No CALLTRACK_SEED_FILE set - using bundled sample calls");
                    bundled_seed()?
                }
            };
            Arc::new(InMemoryCallRepository::with_calls(calls))
        }
    };

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No CALLTRACK_API_KEY set - authentication disabled");
    }

    let state = AppState::new(repo, config.api_key.clone());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", addr);
    tracing::info!("✅ Calltrack API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Calltrack API stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
