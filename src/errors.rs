/*!
 * Error types for the redpen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while validating or loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The chunk token budget must be at least one token
    #[error("Invalid token budget: {0} (must be >= 1)")]
    InvalidTokenBudget(i64),

    /// The configured provider type is not recognized
    #[error("Unknown provider type: {0}")]
    UnknownProvider(String),

    /// The provider endpoint is not a valid URL
    #[error("Invalid provider endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint string that failed to parse
        endpoint: String,
        /// Why it failed
        reason: String,
    },

    /// The maximum output token count must be at least one token
    #[error("Invalid max output tokens: {0} (must be >= 1)")]
    InvalidMaxOutputTokens(i64),
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while correcting and annotating a document
#[derive(Error, Debug)]
pub enum CorrectionError {
    /// A single chunk's correction call failed; this fails the whole document
    #[error("Correction of chunk {chunk_index} failed: {source}")]
    ChunkFailed {
        /// Zero-based index of the chunk in document order
        chunk_index: usize,
        /// The underlying provider error
        source: ProviderError,
    },

    /// Error from the provider API outside any specific chunk
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// The input document is unusable
    #[error("Invalid input: {0}")]
    Input(String),

    /// Error from configuration validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from correction processing
    #[error("Correction error: {0}")]
    Correction(#[from] CorrectionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
