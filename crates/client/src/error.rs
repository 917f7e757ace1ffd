use thiserror::Error;

/// Failures of a single command dispatch.
///
/// The `Display` text is the raw failure description; the panel shows it
/// verbatim in the status banner.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Network(_) | ApiError::Transport(_) => "Network error. Check your connection.",
            ApiError::MalformedReply(_) => "The fan controller sent an unreadable reply.",
            ApiError::InvalidEndpoint(_) => "The configured endpoint is not a valid URL.",
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Transport(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupt: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Could not determine project directories")]
    NoDataDir,
}

pub type StoreResult<T> = Result<T, StoreError>;
