//! Error types for Titanic Chat.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Receptionist error: {0}")]
    Receptionist(#[from] ReceptionistError),

    #[error("Predictor error: {0}")]
    Predictor(#[from] PredictorError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Receptionist (fallback responder) errors.
///
/// Always non-fatal: a failed clarification call degrades to a canned
/// substitute message and never blocks the interview.
#[derive(Debug, thiserror::Error)]
pub enum ReceptionistError {
    #[error("Receptionist request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid receptionist response: {reason}")]
    InvalidResponse { reason: String },
}

/// Predictor service errors.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("Predictor request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Invalid predictor response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Record not suitable for prediction: {reason}")]
    InvalidRecord { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
