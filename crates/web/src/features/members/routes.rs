use axum::{Router, routing::get};

use super::handlers::{get_dashboard, get_member, list_members, upsert_member};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members).post(upsert_member))
        .route("/members/:slug", get(get_member))
        .route("/dashboard", get(get_dashboard))
}
