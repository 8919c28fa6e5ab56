use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to locate workspace")?
        .stdout;
    let cargo_path = std::str::from_utf8(&output)
        .context("failed to read workspace path")?
        .trim()
        .to_string();

    Path::new(&cargo_path)
        .parent()
        .map(Path::to_path_buf)
        .context("workspace manifest has no parent directory")
}

pub fn read_toml(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads `Config{suffix}.toml`-style files from the workspace root.
pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    read_toml(&workspace_dir()?.join(config_name))
}

/// Loads local secrets, e.g. `Secrets.dev.toml`, from the workspace root.
pub fn load_env(secrets_name: &str) -> anyhow::Result<Map<String, Value>> {
    read_toml(&workspace_dir()?.join(secrets_name))
}
