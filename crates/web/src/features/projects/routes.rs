use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{archive_project, click, create_project, delete_project, top_projects, vote};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/top", get(top_projects))
        .route("/:id", delete(delete_project))
        .route("/:id/archive", post(archive_project))
        .route("/:id/vote", post(vote))
        .route("/:id/click", post(click))
}
