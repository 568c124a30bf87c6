//! Aivora support assistant API server.
//!
//! Serves `POST /api/chat/support` backed by Gemini.

use std::io::IsTerminal;
use std::num::NonZeroU32;
use std::sync::Arc;

use aivora_api::config::ApiConfig;
use aivora_core::model::gemini::GeminiFactory;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "aivora_api_server", about = "Aivora support assistant API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind: String,

    /// Per-user requests per minute for AI endpoints (overrides
    /// AI_RATE_LIMIT_PER_MINUTE).
    #[arg(long)]
    ai_rate_limit: Option<NonZeroU32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,aivora_api=debug,aivora_core=debug")),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = args.bind;
    if let Some(limit) = args.ai_rate_limit {
        config.ai_requests_per_minute = limit;
    }

    info!(
        bind_addr = %config.bind_addr,
        model = %config.model.fast_model,
        ai_requests_per_minute = config.ai_requests_per_minute.get(),
        "starting aivora_api_server"
    );
    if !config.model.is_configured() {
        warn!("GEMINI_API_KEY is not set; support chat requests will fail with 500");
    }

    let models = Arc::new(GeminiFactory::new(config.model.clone())?);
    let state = aivora_api::AppState::new(config.clone(), models);
    let app = aivora_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
