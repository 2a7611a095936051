use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failures while loading artifacts or the hotel dataset. The process never
/// starts serving when one of these is raised.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StartupError {
    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Per-request failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caused by the caller: missing or malformed fields.
    #[error("{0}")]
    Input(String),

    /// The encoder produced a vector that does not match the feature schema.
    #[error("encoded {actual} features, schema expects {expected}")]
    EncodingInvariant { expected: usize, actual: usize },

    #[error("prediction failed: {0}")]
    Prediction(String),
}

impl ApiError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Input(_) => StatusCode::BAD_REQUEST,
            ApiError::EncodingInvariant { .. } | ApiError::Prediction(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Input(msg) => msg.clone(),
            internal => {
                tracing::error!(error = %internal, "request failed");
                "internal server error".to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
