use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::ClientError;

pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Server-side check of Turnstile captcha tokens.
#[derive(Debug, Clone)]
pub struct TurnstileVerifier {
    client: Client,
    secret: String,
    verify_url: String,
}

impl TurnstileVerifier {
    pub fn new(secret: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_url(secret, SITEVERIFY_URL)
    }

    pub fn with_url(
        secret: impl Into<String>,
        verify_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            secret: secret.into(),
            verify_url: verify_url.into(),
        })
    }

    /// `Ok(false)` covers both a failed challenge and a non-2xx answer.
    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, ClientError> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response = self.client.post(&self.verify_url).form(&form).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Turnstile verification failed with status {}", response.status());
            return Ok(false);
        }

        let outcome: SiteverifyResponse = response.json().await?;
        if !outcome.success {
            tracing::info!("Turnstile rejected token: {:?}", outcome.error_codes);
        }

        Ok(outcome.success)
    }
}
