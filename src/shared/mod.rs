//! Shared Module
//!
//! Types and pure functions with no I/O: the recipe model, form validation,
//! configuration and the crate error type. The `client` module builds the
//! session store, the HTTP client and the screen controllers on top of these.

/// Recipe data structures
pub mod recipe;

/// Form validators and text helpers
pub mod validation;

/// Error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use recipe::{Category, Recipe, RecipeFields};
pub use error::{ClientError, Result};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
