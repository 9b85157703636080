use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::member::{
    DashboardResponse, MemberProfileResponse, MemberWithProjects, UpsertMemberRequest,
    UpsertMemberResponse,
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::{CurrentUser, MaybeUser};
use crate::middleware::client_ip::{ClientIp, UNKNOWN_IP};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Approved members with their live projects", body = Vec<MemberWithProjects>)
    ),
    tag = "members"
)]
pub async fn list_members(State(state): State<AppState>) -> Result<Response, WebError> {
    let members = services::list_members(state.db.pool()).await?;

    Ok(Json(members).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{slug}",
    params(
        ("slug" = String, Path, description = "Member slug")
    ),
    responses(
        (status = 200, description = "Member profile", body = MemberProfileResponse),
        (status = 404, description = "No approved member with this slug")
    ),
    tag = "members"
)]
pub async fn get_member(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    ApiPath(slug): ApiPath<String>,
) -> Result<Response, WebError> {
    let viewer_email = viewer.as_ref().map(|u| u.email.as_str());
    let profile = services::get_profile(state.db.pool(), &slug, viewer_email).await?;

    Ok(Json(profile).into_response())
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's profile and projects", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "members"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, WebError> {
    let dashboard = services::dashboard(state.db.pool(), &user.email).await?;

    Ok(Json(dashboard).into_response())
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = UpsertMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile created or updated", body = UpsertMemberResponse),
        (status = 400, description = "Invalid profile fields or failed captcha"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile with this id belongs to the caller"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "members"
)]
pub async fn upsert_member(
    State(state): State<AppState>,
    user: CurrentUser,
    ClientIp(ip): ClientIp,
    ApiJson(req): ApiJson<UpsertMemberRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let input = req.check()?;
    tracing::debug!("Profile upsert by user {}", user.id);

    if req.id.is_none() {
        if let Some(verifier) = &state.turnstile {
            let token = req
                .turnstile_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| WebError::BadRequest("Captcha verification required".to_string()))?;

            let remote_ip = (ip != UNKNOWN_IP).then_some(ip.as_str());
            if !verifier.verify(token, remote_ip).await? {
                return Err(WebError::BadRequest("Captcha verification failed".to_string()));
            }
        }
    }

    let result = services::upsert_member(state.db.pool(), &user.email, req.id, &input).await?;

    Ok(Json(result).into_response())
}
