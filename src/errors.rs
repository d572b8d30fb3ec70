use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant is rendered as `{"error": message}` at the route boundary.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Missing or invalid input.
    BadRequest(String),
    /// Credential check failed.
    Unauthorized(String),
    /// Record with the same key already exists.
    Conflict(String),
    /// Required server setting (e.g. the upstream credential) is missing.
    ServerMisconfigured(String),
    /// The upstream text-generation API failed. The message is shown to the client.
    UpstreamError(String),
    /// Reading, parsing or writing the store failed.
    StorageError {
        /// Message returned to the client.
        public: String,
        /// Underlying failure, logged only.
        detail: String,
    },
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Wraps a storage failure with the message the route wants clients to see.
    pub fn storage(public: impl Into<String>, err: impl fmt::Display) -> Self {
        AppError::StorageError {
            public: public.into(),
            detail: err.to_string(),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServerMisconfigured(_)
            | AppError::UpstreamError(_)
            | AppError::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::WithContext { source, .. } => source.status(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ServerMisconfigured(msg) => write!(f, "Server misconfigured: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            AppError::StorageError { public, detail } => {
                write!(f, "Storage error: {} ({})", public, detail)
            }
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to its status code and a `{"error": ...}` body.
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                msg
            }
            AppError::Conflict(msg) => msg,
            AppError::ServerMisconfigured(msg) => {
                tracing::error!("Server misconfigured: {}", msg);
                msg
            }
            AppError::UpstreamError(msg) => {
                tracing::error!("API Error: {}", msg);
                msg
            }
            AppError::StorageError { public, detail } => {
                tracing::error!("Storage error: {} ({})", public, detail);
                public
            }
            AppError::WithContext { source, context } => {
                // Log full context chain, then respond as the source would
                tracing::error!("Error with context: {} -> {}", context, source);
                return (*source).into_response();
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for anything convertible into `AppError`.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: f(),
        })
    }
}
