use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{Page, PageParams},
    leaderboard::LeaderboardEntry,
};

use crate::error::WebError;
use crate::extract::ApiQuery;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(PageParams),
    responses(
        (status = 200, description = "Approved members ranked by points", body = Page<LeaderboardEntry>),
        (status = 400, description = "Invalid pagination")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::leaderboard(state.db.pool(), &params).await?;

    Ok(Json(page).into_response())
}
