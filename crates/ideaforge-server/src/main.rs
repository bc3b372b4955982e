use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use ideaforge_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let addr = config.addr();
    info!(
        provider = %config.provider_name,
        model = %config.model,
        "completion endpoint: {}",
        config.completion_url
    );

    let state = ideaforge_server::app_state(&config);
    let listener = TcpListener::bind(addr).await?;
    info!("ideaforge-server listening on http://{addr}");

    ideaforge_server::serve(listener, state).await
}
