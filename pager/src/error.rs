//! Error types for the creature API client

use crate::types::FetchErrorKind;
use thiserror::Error;

/// Errors that can occur when fetching a creature
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(String),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Connection, DNS, or body read failure
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API has no creature at this index
    #[error("Creature not found")]
    NotFound,

    /// The API answered with another non-success status
    #[error("API error (status {status})")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not a creature record
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),
}

impl FetchError {
    /// Classify this error for the reducer
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::ClientBuild(_) | Self::Timeout | Self::RequestFailed(_) => FetchErrorKind::Transport,
            Self::NotFound => FetchErrorKind::NotFound,
            Self::Status { status } => FetchErrorKind::Http(*status),
            Self::ResponseParseFailed(_) => FetchErrorKind::Decode,
        }
    }
}
