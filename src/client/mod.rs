//! Recipe API Client Module
//!
//! Everything that talks to the outside world: the durable session, the HTTP
//! client and the screen controllers that drive them.
//!
//! # Architecture
//!
//! - **`config`** - Configuration management (server URL, timeouts, paths)
//! - **`session`** - Session store holding the bearer token
//! - **`session_db`** - SQLite persistence behind the session store
//! - **`api`** - HTTP client for the recipe endpoints
//! - **`types`** - Request/response bodies and listing queries
//! - **`state`** - Screen controllers
//! - **`main`** - Command-line front-end (binary)
//!
//! # Example
//!
//! ```rust,no_run
//! use recipebox::client::{ApiClient, Config, LoginController, Session};
//!
//! # async fn example() -> recipebox::shared::Result<()> {
//! let config = Config::from_env()?;
//! let session = Session::open_default(&config).await?;
//! let api = ApiClient::new(config, session)?;
//!
//! let mut login = LoginController::new();
//! login.set_email("cook@example.com");
//! login.set_password("Secret1!");
//! login.submit(&api).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod session;
pub mod session_db;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use session::Session;
pub use state::{
    logout, AddRecipeController, LoginController, RecipeDetailController, RecipeForm,
    RecipeListController, RegisterController, SubmitState, UpdateRecipeController,
};
pub use types::{RecipePage, RecipeQuery, RegisterOutcome};
