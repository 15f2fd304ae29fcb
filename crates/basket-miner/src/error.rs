//! Error types for mining operations

use basket_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while configuring or running an analysis
#[derive(Error, Debug)]
pub enum AprioriError {
    /// Malformed input handed to a setter or constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `run` invoked before the engine was fully configured
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration values out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain value rejected during rule construction
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Background task failed to complete (panic or runtime shutdown)
    #[error("Worker error: {0}")]
    Worker(String),
}
