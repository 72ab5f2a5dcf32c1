//! recipebox - Recipe Book Client Library
//!
//! Client for the recipe-management API: users register, log in, browse
//! recipes by category, add, update and delete recipes and view recipe
//! details. All persistence and business rules live on the server; this crate
//! owns the session token, the HTTP calls, form validation and the per-screen
//! state a front-end renders.
//!
//! # Module Structure
//!
//! - **`shared`** - Pure types and functions
//!   - Recipe model and categories
//!   - Form validators (times, servings, email, password strength)
//!   - Configuration and error types
//!
//! - **`client`** - I/O and screen logic
//!   - Durable session store (SQLite)
//!   - Async HTTP client with bearer authentication
//!   - Screen controllers for login, registration, listing, details and the
//!     add/update forms
//!
//! # Error Handling
//!
//! Every fallible operation returns [`shared::Result`], whose error type
//! [`shared::ClientError`] separates local validation failures from
//! authentication, network and server failures.
//! [`ClientError::user_message`](shared::ClientError::user_message) gives the
//! text to show.
//!
//! # Thread Safety
//!
//! [`client::Session`] and [`client::ApiClient`] are cheap to clone and can be
//! shared across tasks. Controllers take `&mut self` for submissions, so a
//! screen never runs two submissions at once.

/// Shared types and pure functions
pub mod shared;

/// Session store, API client and screen controllers
pub mod client;
