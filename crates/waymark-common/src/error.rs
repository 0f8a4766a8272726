//! Common error types for Waymark components.

use thiserror::Error;

/// Common errors across Waymark components
#[derive(Debug, Error)]
pub enum WaymarkError {
    /// Configuration or catalog error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown location id
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Admin password mismatch
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid input/request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// QR code rendering error
    #[error("QR render error: {0}")]
    Render(String),

    /// Zip archive packing error
    #[error("Archive error: {0}")]
    Archive(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WaymarkError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::NotFound(_) => 404,
            Self::Unauthorized(_) => 401,
            Self::InvalidInput(_) => 400,
            Self::Render(_) => 500,
            Self::Archive(_) => 500,
            Self::Io(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Returns true if the cause is server-side and should not be shown to users
    pub fn is_fatal(&self) -> bool {
        self.status_code() >= 500
    }
}
