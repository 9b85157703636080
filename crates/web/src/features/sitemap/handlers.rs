use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "XML sitemap", content_type = "application/xml", body = String)
    ),
    tag = "sitemap"
)]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, WebError> {
    let xml = services::sitemap(state.db.pool(), &state.config.site_url)
        .await
        .map_err(|e| WebError::InternalServerError(format!("Sitemap rendering failed: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}
