/*!
 * Error types for the scripture-study engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The two reference shapes the parser accepts, quoted in every parse error
pub const ACCEPTED_FORMATS: &str =
    "Use \"Book Chapter:Verse\" (e.g. John 3:16) or \"Book Chapter:Start-End\" (e.g. Genesis 1:1-3)";

/// Errors that can occur when talking to an upstream provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The provider answered successfully but had nothing for the request
    #[error("Provider returned no content for {0}")]
    EmptyResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors produced while parsing a free-text scripture reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The input does not look like `Book Chapter:Verse[-Verse]`
    #[error("Invalid reference \"{input}\". {}", ACCEPTED_FORMATS)]
    InvalidFormat {
        /// The raw input as received
        input: String,
    },

    /// The book portion is not in the registry
    #[error("Unknown book \"{book}\". {}", ACCEPTED_FORMATS)]
    UnknownBook {
        /// The book text as typed
        book: String,
    },

    /// Chapter or verse numbers are zero, or the range runs backwards
    #[error("Invalid chapter or verse range in \"{input}\". {}", ACCEPTED_FORMATS)]
    InvalidRange {
        /// The raw input as received
        input: String,
    },
}

// Callers receive the `{ "error": "..." }` wire shape
impl Serialize for ReferenceError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReferenceError", 1)?;
        state.serialize_field("error", &self.to_string())?;
        state.end()
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error parsing a reference
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
