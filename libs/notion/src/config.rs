use toml::{map::Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_VERSION: &str = "2022-06-28";

/// Where the posts live: a database shared directly, or a page that embeds
/// the database inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostSource {
    Database(String),
    Page(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub source: PostSource,
    pub base_url: String,
    pub version: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{} was not found", key)]
    Missing { key: String },

    #[error("{} has an invalid value: {}", key, message)]
    Invalid { key: String, message: String },
}

impl Config {
    /// Builds the config from secrets and the `[notion]` table of a config
    /// file. `DATABASE_ID` wins over `PAGE_ID` when both are present.
    pub fn load(
        secret: impl Fn(&str) -> Option<String>,
        config: &Map<String, Value>,
    ) -> Result<Self, ConfigError> {
        let secret = |key: &str| secret(key).filter(|v| !v.trim().is_empty());

        let token = secret("NOTION_TOKEN").ok_or_else(|| ConfigError::Missing {
            key: "NOTION_TOKEN".to_string(),
        })?;

        let source = match (secret("DATABASE_ID"), secret("PAGE_ID")) {
            (Some(id), _) => PostSource::Database(id),
            (None, Some(id)) => PostSource::Page(id),
            (None, None) => {
                return Err(ConfigError::Missing {
                    key: "DATABASE_ID or PAGE_ID".to_string(),
                })
            }
        };

        let notion = config.get("notion");
        let base_url = string_or(notion, "base_url", DEFAULT_BASE_URL)?;
        let version = string_or(notion, "version", DEFAULT_VERSION)?;

        Ok(Self {
            token,
            source,
            base_url,
            version,
        })
    }
}

fn string_or(
    table: Option<&Value>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match table.and_then(|t| t.get(key)) {
        None => Ok(default.to_string()),
        Some(value) => value.as_str().map(str::to_string).ok_or_else(|| {
            ConfigError::Invalid {
                key: format!("notion.{}", key),
                message: "expected a string".to_string(),
            }
        }),
    }
}
