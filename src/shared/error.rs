//! Client Error Types
//!
//! Every fallible operation in the crate returns [`ClientError`]. The variants
//! follow how a failure should be presented to the user rather than where it
//! came from.
//!
//! # Error Categories
//!
//! - `Validation` - a local field check failed (never reaches the network), or
//!   the server rejected a submitted value
//! - `Auth` - missing or rejected token, or bad credentials
//! - `Network` - no response was received
//! - `Server` - non-2xx response that carried a message
//! - `NotFound` - the requested recipe does not exist
//! - `Unknown` - anything else
//! - `Storage` - the local session database failed
//! - `Config` - invalid client configuration
//!
//! # Usage
//!
//! ```rust
//! use recipebox::shared::error::ClientError;
//!
//! let error = ClientError::validation("servings", "Servings should be a positive number.");
//! assert_eq!(error.user_message(), "Servings should be a positive number.");
//! ```
use thiserror::Error;

use crate::shared::config::ConfigError;

/// Fallback text shown when no better message is available
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors produced by the session store, the API client and the controllers
#[derive(Debug, Error)]
pub enum ClientError {
    /// Field validation failure
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Missing/invalid token or rejected credentials
    #[error("Authentication error: {message}")]
    Auth {
        /// Human-readable error message
        message: String,
    },

    /// The request never got a response
    #[error("Network error: {message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// Non-2xx response with a body
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message returned by the server
        message: String,
    },

    /// The requested resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Anything that fits no other category
    #[error("Unknown error: {message}")]
    Unknown {
        /// Human-readable error message
        message: String,
    },

    /// Local session database failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new unknown error
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Error returned when an authenticated call is made without a token
    pub fn not_logged_in() -> Self {
        Self::auth("You are not logged in. Please log in to continue.")
    }

    /// Text a presentation layer can show as-is
    ///
    /// Server, validation, auth and not-found errors carry a message meant for
    /// the user. Everything else falls back to a generic string, except network
    /// failures which get a connectivity hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Auth { message }
            | Self::Server { message, .. }
            | Self::NotFound { message } => message.clone(),
            Self::Network { .. } => {
                "No response from server. Please check your network connection.".to_string()
            }
            Self::Unknown { .. } | Self::Storage(_) | Self::Config(_) => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Whether the error should send the user back to the login screen
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::unknown(format!("JSON error: {}", err))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ClientError>;
