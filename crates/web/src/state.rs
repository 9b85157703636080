use std::sync::Arc;
use storage::Database;

use crate::clients::{auth::AuthClient, turnstile::TurnstileVerifier};
use crate::config::Config;
use crate::middleware::{auth::AdminEmails, rate_limit::RateLimiter};

/// Everything a handler can reach through `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthClient,
    /// `None` when no Turnstile secret is configured.
    pub turnstile: Option<TurnstileVerifier>,
    pub limiter: RateLimiter,
    pub admins: AdminEmails,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> anyhow::Result<Self> {
        let auth = AuthClient::new(&config.auth_url, &config.auth_api_key)?;
        let turnstile = config
            .turnstile_secret_key
            .as_deref()
            .map(TurnstileVerifier::new)
            .transpose()?;

        Ok(Self {
            db,
            auth,
            turnstile,
            limiter: RateLimiter::new(),
            admins: AdminEmails::from_comma_separated(&config.admin_emails),
            config: Arc::new(config),
        })
    }
}
