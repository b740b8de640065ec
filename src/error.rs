//! Error types for Loadwatch
//!
//! Centralized error handling using thiserror. The loading store and the
//! event emitter are infallible; errors only come from the ambient layers
//! (configuration, serialization, IO).

use thiserror::Error;

/// All error types that can occur in Loadwatch
#[derive(Debug, Error)]
pub enum LoadwatchError {
    /// Configuration could not be located or loaded
    #[error("Config error: {0}")]
    Config(String),

    /// Configuration was loaded but holds values that make no sense
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Loadwatch operations
pub type Result<T> = std::result::Result<T, LoadwatchError>;
