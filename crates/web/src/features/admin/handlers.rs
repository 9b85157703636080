use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    admin::{AdminMemberList, MemberListQuery, ModerationResponse},
    common::Ack,
    member::MemberResponse,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::auth::AdminIdentity;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/members",
    params(MemberListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Members, newest first, with the pending count", body = AdminMemberList),
        (status = 401, description = "Not an admin")
    ),
    tag = "admin"
)]
pub async fn list_members(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MemberListQuery>,
) -> Result<Response, WebError> {
    let list = services::list_members(state.db.pool(), query.filter).await?;

    Ok(Json(list).into_response())
}

async fn moderate(
    state: &AppState,
    admin: &AdminIdentity,
    id: Uuid,
    approved: bool,
) -> Result<Response, WebError> {
    tracing::debug!("Moderation of {} by {:?}", id, admin.email);
    let member = services::set_approval(state.db.pool(), id, approved).await?;

    Ok(Json(ModerationResponse {
        success: true,
        member: MemberResponse::from(member),
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/members/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Member id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member approved", body = ModerationResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Member not found")
    ),
    tag = "admin"
)]
pub async fn approve_member(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    moderate(&state, &admin, id, true).await
}

#[utoipa::path(
    post,
    path = "/api/admin/members/{id}/revoke",
    params(
        ("id" = Uuid, Path, description = "Member id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Approval revoked", body = ModerationResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Member not found")
    ),
    tag = "admin"
)]
pub async fn revoke_member(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    moderate(&state, &admin, id, false).await
}

#[utoipa::path(
    delete,
    path = "/api/admin/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member deleted", body = Ack),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Member not found")
    ),
    tag = "admin"
)]
pub async fn delete_member(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    services::delete_member(state.db.pool(), id).await?;

    Ok(Json(Ack::ok()).into_response())
}
