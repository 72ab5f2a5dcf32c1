//! Screen controllers
//!
//! One controller per screen. A controller owns the screen's form values and
//! field errors, runs the validators, calls the [`ApiClient`] and records the
//! outcome in a [`SubmitState`]. Rendering and navigation stay outside; they
//! read the controller state and react to the returned `Result`.
//!
//! [`ApiClient`]: crate::client::api::ApiClient

pub mod login;
pub mod recipe_detail;
pub mod recipe_form;
pub mod recipe_list;
pub mod register;

pub use login::LoginController;
pub use recipe_detail::RecipeDetailController;
pub use recipe_form::{AddRecipeController, RecipeForm, UpdateRecipeController};
pub use recipe_list::RecipeListController;
pub use register::RegisterController;

use crate::client::session::Session;
use crate::shared::error::{ClientError, Result};

/// Progress of a screen's submission or load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    /// User-facing message
    Error(String),
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitState::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Back to idle once the presentation layer has shown the outcome
    pub fn reset(&mut self) {
        *self = SubmitState::Idle;
    }

    /// Enter `Submitting`; only one submission may be in flight
    pub(crate) fn start(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(ClientError::validation(
                "form",
                "A request is already in progress.",
            ));
        }
        *self = SubmitState::Submitting;
        Ok(())
    }

    /// Record `err` and hand it back to the caller
    pub(crate) fn fail(&mut self, err: ClientError) -> ClientError {
        tracing::warn!("Submission failed: {}", err);
        *self = SubmitState::Error(err.user_message());
        err
    }

    pub(crate) fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                *self = SubmitState::Success;
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }
}

/// End the session
///
/// Afterwards every authenticated call fails with [`ClientError::Auth`]
/// until the user logs in again.
pub async fn logout(session: &Session) -> Result<()> {
    session.clear_token().await
}
