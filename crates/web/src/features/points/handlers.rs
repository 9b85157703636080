use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        common::{Ack, Page, PageParams},
        points::AwardPointsRequest,
    },
    models::PointTransaction,
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AdminIdentity;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/points",
    request_body = AwardPointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points awarded", body = Ack),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not an admin"),
        (status = 500, description = "Failed to award points")
    ),
    tag = "admin"
)]
pub async fn award_points(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    ApiJson(req): ApiJson<AwardPointsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let input = req.check()?;

    let awarded_by = services::admin_member_id(state.db.pool(), admin.email.as_deref()).await?;
    services::award(state.db.pool(), &input, awarded_by).await?;

    Ok(Json(Ack::ok()).into_response())
}

#[utoipa::path(
    get,
    path = "/api/members/{slug}/points",
    params(
        ("slug" = String, Path, description = "Member slug"),
        PageParams
    ),
    responses(
        (status = 200, description = "Point history, newest first", body = Page<PointTransaction>),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "No approved member with this slug")
    ),
    tag = "members"
)]
pub async fn member_points(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::ledger(state.db.pool(), &slug, &params).await?;

    Ok(Json(page).into_response())
}
