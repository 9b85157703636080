pub mod auth;
pub mod turnstile;

use thiserror::Error;

/// Failures talking to an external HTTP service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response ({status}): {body}")]
    UnexpectedStatus { status: u16, body: String },
}
