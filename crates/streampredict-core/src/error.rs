//! Error types for StreamPredict

/// Result type alias using StreamPredict's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for StreamPredict operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model artifact could not be located or loaded. Fatal at startup.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The classifier failed on a specific feature vector
    #[error("inference error: {0}")]
    Inference(String),

    /// Request data failed arity or range checks
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error prevents the service from starting at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_) | Self::Config(_))
    }

    /// Short machine-readable kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::Inference(_) => "inference",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
