use axum::http::StatusCode;
use thiserror::Error;

// ─── Backend boundary ────────────────────────────────────────────────────────

/// Failure of a single `generateContent` call, classified where the call is
/// made. The fallback loop only ever looks at the variant.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Quota or rate-limit signal. The next candidate may still succeed.
    #[error("model {model} is rate limited: {message}")]
    RateLimited { model: String, message: String },

    /// Anything else: auth, malformed input, transport, empty output.
    #[error("model {model} request failed: {message}")]
    Failed { model: String, message: String },
}

impl BackendError {
    pub fn rate_limited(model: &str, message: impl Into<String>) -> Self {
        Self::RateLimited {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn failed(model: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    pub fn model(&self) -> &str {
        match self {
            Self::RateLimited { model, .. } | Self::Failed { model, .. } => model,
        }
    }
}

// ─── Fallback loop ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Fatal(BackendError),

    #[error("all model candidates are rate limited (tried: {})", attempted.join(", "))]
    AllModelsExhausted { attempted: Vec<String> },
}

// ─── Chat request processing ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("conversation has no messages")]
    EmptyConversation,

    #[error("invalid inline image: {0}")]
    InvalidImage(String),

    #[error("prompt rendering failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::EmptyConversation | Self::InvalidImage(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Prompt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Dispatch(DispatchError::Fatal(_)) => StatusCode::BAD_GATEWAY,
            Self::Dispatch(DispatchError::AllModelsExhausted { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(
            self,
            Self::Dispatch(DispatchError::AllModelsExhausted { .. })
        )
    }
}

// ─── Upload normalization ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FileProcessingError {
    #[error("failed to read uploaded file: {0}")]
    Unreadable(String),

    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("file processing task aborted: {0}")]
    Aborted(String),
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),
}
