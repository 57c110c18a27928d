//! # Error Types
//!
//! Custom error types for Hand Pilot using `thiserror`.
//!
//! Only construction-time failures leave the library as errors. Per-frame
//! conditions (backpressure, invalid packets) are absorbed by the component
//! that hits them.

use thiserror::Error;

/// Main error type for Hand Pilot
#[derive(Debug, Error)]
pub enum HandPilotError {
    /// Out-of-range construction parameter (alpha, deadzone, sensitivity, host, port)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The network resource could not be created
    #[error("Transport resource error: {0}")]
    Resource(std::io::Error),

    /// A telemetry packet could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Malformed upstream sample
    #[error("Sample error: {0}")]
    Sample(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Hand Pilot
pub type Result<T> = std::result::Result<T, HandPilotError>;
