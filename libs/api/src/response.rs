use std::{collections::HashMap, fmt::Display, sync::OnceLock};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::ApiError;

static ERROR_CODES: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Message registered for an error code in `error-code.json`.
pub fn error_message(error_code: &str) -> String {
    let errors = ERROR_CODES.get_or_init(|| {
        serde_json::from_str(include_str!("error-code.json")).unwrap_or_else(
            |e| {
                error!(task = "load error codes", error = e.to_string());
                HashMap::new()
            },
        )
    });

    errors
        .get(error_code)
        .cloned()
        .unwrap_or_else(|| format!("Unexpected error ({})", error_code))
}

/// Logs a failure and turns it into the message shown to the user.
pub trait IntoNotice {
    fn into_notice(self, error_code: &str) -> String;
}

impl<E: Display> IntoNotice for E {
    fn into_notice(self, error_code: &str) -> String {
        error!(error_code, error = self.to_string());
        format!("{}: {}", error_message(error_code), self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status_code, Json(json!({ "message": message }))).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

impl<T, E: Display> IntoApiResponse<T> for Result<T, E> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            let message = e.into_notice(error_code);
            match error_code.as_bytes().first() {
                Some(&b'4') => ApiError::ClientError(message),
                _ => ApiError::ServerError(message),
            }
        })
    }
}
