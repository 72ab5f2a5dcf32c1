//! Recipe API Client
//!
//! Async functions for every endpoint of the recipe API. Login and
//! registration are anonymous; every other call reads the bearer token from the
//! [`Session`] first and fails with [`ClientError::Auth`] before touching the
//! network when there is none.

use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::client::config::Config;
use crate::client::session::Session;
use crate::client::types::{
    ApiErrorBody, AuthResponse, CredentialsRequest, ListRecipesResponse, RecipePage, RecipeQuery,
    RegisterOutcome,
};
use crate::shared::error::{ClientError, Result};
use crate::shared::recipe::{Recipe, RecipeFields};

pub const LOGIN_PATH: &str = "/api/v1/login";
pub const REGISTER_PATH: &str = "/api/v1/register";
pub const RECIPES_PATH: &str = "/api/v1/recipes";

/// HTTP client for the recipe API
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    session: Session,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::unknown(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in and return the token; storing it is up to the caller
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.config.api_url(LOGIN_PATH);
        let request = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::debug!("POST {}", LOGIN_PATH);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(if status.is_client_error() {
                ClientError::auth(message.unwrap_or_else(|| "Invalid email or password.".to_string()))
            } else {
                ClientError::unknown(message.unwrap_or_else(|| format!("Login failed: {}", status)))
            });
        }

        let auth: AuthResponse = response.json().await.map_err(transport_error)?;
        auth.token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::unknown("Login response did not include a token"))
    }

    /// Create an account
    ///
    /// Server-side rejections such as a duplicate email come back as
    /// [`ClientError::Validation`].
    pub async fn register(&self, email: &str, password: &str) -> Result<RegisterOutcome> {
        let url = self.config.api_url(REGISTER_PATH);
        let request = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        tracing::debug!("POST {}", REGISTER_PATH);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(if status.is_client_error() {
                ClientError::validation(
                    "email",
                    message.unwrap_or_else(|| "Registration was rejected.".to_string()),
                )
            } else {
                status_error(status, message)
            });
        }

        // Some deployments answer with an empty body.
        let body = response.text().await.map_err(transport_error)?;
        let auth: AuthResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(RegisterOutcome {
            token: auth.token.filter(|token| !token.is_empty()),
        })
    }

    /// One page of recipes, filtered by `query`
    pub async fn list_recipes(&self, query: &RecipeQuery) -> Result<RecipePage> {
        let url = self.config.api_url(RECIPES_PATH);
        let request = self
            .authorized(Method::GET, url)
            .await?
            .query(&query.to_pairs());
        tracing::debug!(page = query.page, limit = query.limit, "GET {}", RECIPES_PATH);

        let response = send_checked(request).await?;
        let body: ListRecipesResponse = response.json().await.map_err(transport_error)?;
        Ok(RecipePage::from_response(query, body))
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        let url = self.recipe_url(id)?;
        tracing::debug!("GET {}/{}", RECIPES_PATH, id);
        let response = send_checked(self.authorized(Method::GET, url).await?).await?;
        response.json().await.map_err(transport_error)
    }

    /// Submit a new recipe as multipart form data
    ///
    /// The server answers 201 on success; any other 2xx is treated as a
    /// failure.
    pub async fn create_recipe(&self, fields: &RecipeFields) -> Result<()> {
        let url = self.config.api_url(RECIPES_PATH);
        let form = fields
            .form_pairs()
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| form.text(name, value));
        tracing::debug!("POST {}", RECIPES_PATH);

        let response = send_checked(self.authorized(Method::POST, url).await?.multipart(form)).await?;
        if response.status() != StatusCode::CREATED {
            return Err(ClientError::unknown(format!(
                "Failed to add recipe (status {}).",
                response.status()
            )));
        }
        Ok(())
    }

    /// Replace every field of a recipe and return the stored version
    pub async fn update_recipe(&self, id: &str, fields: &RecipeFields) -> Result<Recipe> {
        let url = self.recipe_url(id)?;
        tracing::debug!("PUT {}/{}", RECIPES_PATH, id);

        let response = send_checked(self.authorized(Method::PUT, url).await?.json(fields)).await?;
        let body = response.text().await.map_err(transport_error)?;
        match serde_json::from_str::<Recipe>(&body) {
            Ok(recipe) => Ok(recipe),
            Err(_) => {
                tracing::debug!("Update response carried no recipe, refetching {}", id);
                self.get_recipe(id).await
            }
        }
    }

    /// Delete a recipe; a recipe that is already gone counts as deleted
    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        let url = self.recipe_url(id)?;
        tracing::debug!("DELETE {}/{}", RECIPES_PATH, id);

        match send_checked(self.authorized(Method::DELETE, url).await?).await {
            Ok(_) => Ok(()),
            Err(ClientError::NotFound { .. }) => {
                tracing::debug!("Recipe {} was already deleted", id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Request builder with the bearer token attached
    async fn authorized(&self, method: Method, url: impl reqwest::IntoUrl) -> Result<RequestBuilder> {
        let token = self
            .session
            .get_token()
            .await
            .ok_or_else(ClientError::not_logged_in)?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    fn recipe_url(&self, id: &str) -> Result<Url> {
        if id.trim().is_empty() {
            return Err(ClientError::validation("id", "Recipe id is required."));
        }
        let mut url = Url::parse(&self.config.api_url(RECIPES_PATH))
            .map_err(|e| ClientError::unknown(format!("Invalid recipe URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::unknown("Server URL cannot hold a path"))?
            .push(id);
        Ok(url)
    }
}

/// Send and turn non-2xx responses into errors
async fn send_checked(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(response).await;
    Err(status_error(status, message))
}

/// Map a non-2xx status for the authenticated endpoints
fn status_error(status: StatusCode, message: Option<String>) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::auth(
            message.unwrap_or_else(|| "Your session has expired. Please log in again.".to_string()),
        ),
        StatusCode::NOT_FOUND => {
            ClientError::not_found(message.unwrap_or_else(|| "Recipe not found.".to_string()))
        }
        _ => match message {
            Some(message) => ClientError::server(status.as_u16(), message),
            None => ClientError::unknown(format!("Request failed: {}", status)),
        },
    }
}

/// Message from an error body, if it has one
///
/// JSON bodies yield their `error`/`message` field. Anything else, such as a
/// proxy's HTML page, is passed through as trimmed text.
async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    body_message(&body)
}

fn body_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.into_message(),
        Err(_) => Some(body.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string),
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_decode() {
        ClientError::unknown(format!("Failed to parse response: {}", e))
    } else if e.is_timeout() || e.is_connect() || e.is_request() {
        ClientError::network(e.to_string())
    } else {
        ClientError::unknown(e.to_string())
    }
}
