use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::Ack,
    project::{CreateProjectRequest, CreateProjectResponse, ProjectResponse, TopProjectEntry},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::CurrentUser;
use crate::middleware::client_ip::ClientIp;
use crate::middleware::rate_limit::{RateDecision, RateRule, retry_after_secs};
use crate::state::AppState;

use super::services;

fn throttle(state: &AppState, key: &str, rule: RateRule) -> Result<(), WebError> {
    match state.limiter.check(key, rule) {
        RateDecision::Allowed => Ok(()),
        RateDecision::Limited { retry_after } => {
            tracing::warn!("Rate limit hit for {}", key);
            Err(WebError::TooManyRequests {
                retry_after_secs: retry_after_secs(retry_after),
            })
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Project created", body = CreateProjectResponse),
        (status = 400, description = "Missing fields, invalid title or URL, or project limit reached"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Member does not belong to the caller")
    ),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let input = req.check()?;

    let project = services::create_project(state.db.pool(), &user.email, &input).await?;

    Ok(Json(CreateProjectResponse {
        success: true,
        project: ProjectResponse::from(project),
    })
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Project deleted", body = Ack),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_project(state.db.pool(), id, &user.email).await?;

    Ok(Json(Ack::ok()).into_response())
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Project archived", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn archive_project(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    let project = services::archive_project(state.db.pool(), id, &user.email).await?;

    Ok(Json(ProjectResponse::from(project)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/projects/top",
    responses(
        (status = 200, description = "Most voted projects this month", body = Vec<TopProjectEntry>)
    ),
    tag = "projects"
)]
pub async fn top_projects(State(state): State<AppState>) -> Result<Response, WebError> {
    let projects = services::top_projects(state.db.pool()).await?;

    Ok(Json(projects).into_response())
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/vote",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Vote recorded", body = Ack),
        (status = 400, description = "Already voted this month"),
        (status = 404, description = "Project not found"),
        (status = 429, description = "Too many requests")
    ),
    tag = "projects"
)]
pub async fn vote(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    throttle(&state, &format!("vote:{}:{}", id, ip), state.config.vote_rule)?;

    services::vote(state.db.pool(), id, &ip).await?;

    Ok(Json(Ack::ok()).into_response())
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/click",
    params(
        ("id" = Uuid, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Click counted", body = Ack),
        (status = 429, description = "Too many requests")
    ),
    tag = "projects"
)]
pub async fn click(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    throttle(&state, &format!("click:{}:{}", id, ip), state.config.click_rule)?;

    services::click(state.db.pool(), id).await?;

    Ok(Json(Ack::ok()).into_response())
}
