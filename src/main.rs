use clap::Parser;
use tracing_subscriber::EnvFilter;

use resource_catalog::config::AppConfig;
use resource_catalog::{app, AppState};

#[derive(Parser)]
#[command(name = "resource-catalog")]
#[command(about = "Resource catalog web service backed by a PocketBase-compatible API")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Backend base URL (overrides BACKEND_URL)")]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up BACKEND_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resource_catalog=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config: AppConfig = resource_catalog::config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.backend_url {
        config = config.with_backend_url(url);
    }

    tracing::info!(
        "Starting resource catalog in {:?} mode, backend at {}",
        config.environment,
        config.backend.url
    );

    let bind_addr = config.bind_addr();
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
