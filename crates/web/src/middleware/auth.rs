use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::clients::auth::AuthUser;
use crate::error::WebError;
use crate::state::AppState;

/// Emails allowed through `require_admin`.
#[derive(Debug, Clone, Default)]
pub struct AdminEmails {
    emails: Arc<HashSet<String>>,
}

impl AdminEmails {
    pub fn from_comma_separated(emails_str: &str) -> Self {
        let emails = emails_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect();

        Self {
            emails: Arc::new(emails),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolves the session behind the request's bearer token, if any.
async fn session_user(state: &AppState, headers: &HeaderMap) -> Result<Option<AuthUser>, WebError> {
    let Some(token) = bearer_token(headers) else {
        return Ok(None);
    };

    Ok(state.auth.get_user(token).await?)
}

/// A signed-in user with an email address.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

impl TryFrom<AuthUser> for CurrentUser {
    type Error = WebError;

    fn try_from(user: AuthUser) -> Result<Self, Self::Error> {
        match user.email {
            Some(email) if !email.trim().is_empty() => Ok(Self { id: user.id, email }),
            _ => Err(WebError::Unauthorized),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = session_user(state, &parts.headers)
            .await?
            .ok_or(WebError::Unauthorized)?;

        CurrentUser::try_from(user)
    }
}

/// Like `CurrentUser`, but anonymous visitors get `None` instead of a 401.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = match session_user(state, &parts.headers).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Treating request as anonymous, session lookup failed: {}", e);
                None
            }
        };

        Ok(MaybeUser(user.and_then(|u| CurrentUser::try_from(u).ok())))
    }
}

/// Who passed `require_admin`. The email is absent when the check was
/// bypassed in development mode for an anonymous caller.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: Option<String>,
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let user = if state.config.dev_mode {
        session_user(&state, request.headers()).await.ok().flatten()
    } else {
        session_user(&state, request.headers()).await?
    };
    let email = user.and_then(|u| u.email);

    if !state.config.dev_mode {
        match email.as_deref() {
            Some(email) if state.admins.is_admin(email) => {}
            Some(email) => {
                tracing::warn!("Admin access denied for {}", email);
                return Err(WebError::Unauthorized);
            }
            None => return Err(WebError::Unauthorized),
        }
    }

    request.extensions_mut().insert(AdminIdentity { email });
    Ok(next.run(request).await)
}
