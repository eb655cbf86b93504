use axum::routing::{get, put};
use axum::Router;

use crate::handlers::mission;
use crate::state::AppState;

/// ```text
/// GET    /mission/                 -> list
/// POST   /mission/                 -> create
/// GET    /mission/{id}             -> get_by_id
/// DELETE /mission/{id}             -> delete
/// PUT    /mission/{id}/completed   -> update_completed
/// PUT    /mission/{id}/assign      -> assign_cat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mission/", get(mission::list).post(mission::create))
        .route(
            "/mission/{id}",
            get(mission::get_by_id).delete(mission::delete),
        )
        .route("/mission/{id}/completed", put(mission::update_completed))
        .route("/mission/{id}/assign", put(mission::assign_cat))
}
