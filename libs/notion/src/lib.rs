mod client;
mod config;
pub mod posts;
pub mod properties;
mod response;
pub mod submission;

pub use client::Client;
pub use config::{Config, ConfigError, PostSource};
pub use posts::{fetch_posts, FetchOutcome};
pub use submission::{create_post, parse_count, PostDraft, SubmitError};

#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    #[error("failed to call notion: {}: {}", message, source)]
    Request {
        source: reqwest::Error,
        message: String,
    },

    #[error("invalid header: {}: {}", message, source)]
    InvalidHeader {
        source: reqwest::header::InvalidHeaderValue,
        message: String,
    },

    #[error("notion responded with {}: {}", status_code, message)]
    FailedStatusCode {
        status_code: reqwest::StatusCode,
        message: String,
    },

    #[error("failed to handle json: {}: {}", message, source)]
    SerdeJson {
        source: serde_json::Error,
        message: String,
    },
}
