use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::target;
use crate::state::AppState;

/// ```text
/// POST   /target/                 -> create
/// GET    /target/{id}             -> get_by_id
/// DELETE /target/{id}             -> delete
/// PUT    /target/{id}/completed   -> update_completed
/// PUT    /target/{id}/notes       -> update_notes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/target/", post(target::create))
        .route("/target/{id}", get(target::get_by_id).delete(target::delete))
        .route("/target/{id}/completed", put(target::update_completed))
        .route("/target/{id}/notes", put(target::update_notes))
}
