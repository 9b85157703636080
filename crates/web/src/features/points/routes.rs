use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{award_points, member_points};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin/points", post(award_points))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/members/:slug/points", get(member_points))
        .merge(admin)
}
