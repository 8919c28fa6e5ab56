use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::serve;
use tokio::net::TcpListener;
use toml::map::Map;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets = util::load_env("Secrets.dev.toml")?;

    let config = match secrets.get("CONFIG").and_then(|c| c.as_str()) {
        Some(config) => util::load_config(&format!("Config{}.toml", config))?,
        None => Map::new(),
    };

    let notion_config = notion::Config::load(
        |key| {
            secrets
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        },
        &config,
    )?;
    let api_config = api::Config::load(&config)?;

    let router = serve(notion_config, &api_config).await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, api_config.port));
    let listener = TcpListener::bind(&address)
        .await
        .context("failed to bind address")?;
    Ok(axum::serve(listener, router).await?)
}
