use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::ClientError;

type Result<T> = std::result::Result<T, ClientError>;

/// The signed-in user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Client for the hosted auth service's session lookup.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    /// # Arguments
    /// * `base_url` - Root of the auth service (e.g., "https://xyz.auth.example.com")
    /// * `api_key` - Project key sent along with every lookup
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Resolves an access token. Rejected tokens give `Ok(None)`; only
    /// transport problems and server errors are `Err`.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || status == StatusCode::NOT_FOUND
        {
            tracing::debug!("Auth service rejected session token ({})", status);
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let user: AuthUser = response.json().await?;
        Ok(Some(user))
    }
}
