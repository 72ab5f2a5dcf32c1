use crate::client::api::ApiClient;
use crate::client::state::SubmitState;
use crate::shared::error::{ClientError, Result};

/// Login screen
#[derive(Debug, Clone, Default)]
pub struct LoginController {
    pub email: String,
    pub password: String,
    state: SubmitState,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Log in and store the token in the client's session
    ///
    /// The password is cleared on success.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            let err = ClientError::validation(
                "credentials",
                "Please fill in both email and password.",
            );
            return Err(self.state.fail(err));
        }

        self.state.start()?;
        let result = async {
            let token = api.login(self.email.trim(), &self.password).await?;
            api.session().set_token(token).await
        }
        .await;

        let outcome = self.state.finish(result);
        if outcome.is_ok() {
            tracing::info!("Logged in as {}", self.email.trim());
            self.password.clear();
        }
        outcome
    }
}
