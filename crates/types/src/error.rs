//! Error types for the stackforge synthesizer

use thiserror::Error;

/// Main error type for the stackforge system
#[derive(Error, Debug)]
pub enum StackforgeError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template synthesis errors
    #[error("Synthesis error: {0}")]
    Synth(String),
}

/// Result type alias for stackforge operations
pub type Result<T> = std::result::Result<T, StackforgeError>;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No document exists for the requested environment
    #[error("Configuration document not found: {path}")]
    FileNotFound { path: String },

    /// Document exists but is not a well-formed JSON mapping
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

/// Synthesis specific errors
#[derive(Error, Debug)]
pub enum SynthError {
    /// Two resources were declared under the same logical ID
    #[error("Duplicate logical ID: {id}")]
    DuplicateLogicalId { id: String },

    /// Logical ID contains no characters CloudFormation accepts
    #[error("Invalid logical ID: {id:?}")]
    InvalidLogicalId { id: String },

    /// Stack name resolved to an empty string
    #[error("Stack name cannot be empty")]
    EmptyStackName,

    /// Template could not be rendered to JSON
    #[error("Template render error: {0}")]
    Render(String),
}

// Conversion implementations for common error types

impl From<ConfigError> for StackforgeError {
    fn from(err: ConfigError) -> Self {
        StackforgeError::Config(err.to_string())
    }
}

impl From<SynthError> for StackforgeError {
    fn from(err: SynthError) -> Self {
        StackforgeError::Synth(err.to_string())
    }
}
