use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("{url} responded with status {status}: {body}")]
    HttpStatusError {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {url}: {source}")]
    DecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

/// 錯誤分類，用於結構化日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    HttpStatus,
    Decode,
    Configuration,
    System,
}

impl ProfileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfileError::NetworkError(_) => ErrorCategory::Network,
            ProfileError::HttpStatusError { .. } => ErrorCategory::HttpStatus,
            ProfileError::DecodeError { .. } => ErrorCategory::Decode,
            ProfileError::ConfigError { .. } | ProfileError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ProfileError::IoError(_) | ProfileError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProfileError::NetworkError(_) => {
                "Could not reach the upstream API, check your network connection".to_string()
            }
            ProfileError::HttpStatusError { status, .. } => {
                format!("Upstream API rejected the request (HTTP {})", status)
            }
            ProfileError::DecodeError { .. } => {
                "Upstream API returned a response that could not be parsed".to_string()
            }
            ProfileError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ProfileError::ServerError { message } => format!("HTTP server failed: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
