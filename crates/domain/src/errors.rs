//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LabTrack
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LabTrackError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote API error ({status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabTrackError {
    /// Build a remote API error from a status code and response body.
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteApi { status, body: body.into() }
    }
}

/// Result type alias for LabTrack operations
pub type Result<T> = std::result::Result<T, LabTrackError>;
