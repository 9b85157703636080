use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{approve_member, delete_member, list_members, revoke_member};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/members", get(list_members))
        .route("/admin/members/:id", delete(delete_member))
        .route("/admin/members/:id/approve", post(approve_member))
        .route("/admin/members/:id/revoke", post(revoke_member))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
