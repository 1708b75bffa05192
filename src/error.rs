use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Signal analysis errors
    #[error("Signal buffer is empty")]
    EmptySignal,

    #[error("Insufficient data: need at least {needed} points, have {actual}")]
    InsufficientData { needed: usize, actual: usize },

    // Storage errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MonitorError {
    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            MonitorError::InvalidConfiguration(_) => "configuration",

            MonitorError::EmptySignal | MonitorError::InsufficientData { .. } => "signal",

            MonitorError::SerializationError(_) => "storage",
        }
    }
}

// Result type alias for convenience
pub type MonitorResult<T> = Result<T, MonitorError>;
