use crate::client::api::ApiClient;
use crate::client::state::SubmitState;
use crate::client::types::RegisterOutcome;
use crate::shared::error::{ClientError, Result};
use crate::shared::validation::{
    all_requirements_met, email_error, password_requirements, validate_email, RequirementStatus,
    EMAIL_MESSAGE,
};

/// Registration screen
#[derive(Debug, Clone, Default)]
pub struct RegisterController {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    email_error: Option<&'static str>,
    state: SubmitState,
}

impl RegisterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Updates the email error as the user types
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.email_error = email_error(&self.email);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_confirm_password(&mut self, password: impl Into<String>) {
        self.confirm_password = password.into();
    }

    pub fn email_error(&self) -> Option<&'static str> {
        self.email_error
    }

    /// Live status of every password rule
    pub fn password_requirements(&self) -> Vec<RequirementStatus> {
        password_requirements(&self.password)
    }

    /// The checklist is shown while a password is typed and not yet strong
    pub fn show_requirements(&self) -> bool {
        !self.password.is_empty() && !all_requirements_met(&self.password)
    }

    fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(ClientError::validation(
                "confirm_password",
                "Passwords do not match.",
            ));
        }
        if !validate_email(&self.email) {
            return Err(ClientError::validation("email", EMAIL_MESSAGE));
        }
        if !all_requirements_met(&self.password) {
            return Err(ClientError::validation(
                "password",
                "Please fulfill all password requirements.",
            ));
        }
        Ok(())
    }

    /// Register; a token in the response is stored in the session
    pub async fn submit(&mut self, api: &ApiClient) -> Result<RegisterOutcome> {
        if let Err(err) = self.validate() {
            return Err(self.state.fail(err));
        }

        self.state.start()?;
        let result = async {
            let outcome = api.register(&self.email, &self.password).await?;
            if let Some(token) = &outcome.token {
                api.session().set_token(token.clone()).await?;
            }
            Ok(outcome)
        }
        .await;

        let outcome = self.state.finish(result);
        if outcome.is_ok() {
            tracing::info!("Registered {}", self.email);
            self.password.clear();
            self.confirm_password.clear();
        }
        outcome
    }
}
