use shuttle_runtime::{Error, SecretStore, Secrets};
use toml::map::Map;

#[shuttle_runtime::main]
async fn main(#[Secrets] secret_store: SecretStore) -> shuttle_axum::ShuttleAxum {
    let level = match secret_store.get("ENV").as_deref() {
        Some("prod") | None => tracing::Level::INFO,
        Some(_) => tracing::Level::DEBUG,
    };
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();

    let config = match secret_store.get("CONFIG") {
        Some(config) => util::load_config(&format!("Config{}.toml", config))
            .map_err(|e| Error::BuildPanic(e.to_string()))?,
        None => Map::new(),
    };

    let notion_config =
        notion::Config::load(|key| secret_store.get(key), &config)
            .map_err(|e| Error::BuildPanic(e.to_string()))?;
    let api_config = api::Config::load(&config)
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let router = api::serve(notion_config, &api_config)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
