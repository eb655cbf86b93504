use axum::routing::{get, put};
use axum::Router;

use crate::handlers::spy_cat;
use crate::state::AppState;

/// ```text
/// GET    /cat/                   -> list
/// POST   /cat/                   -> create
/// GET    /cat/{id}               -> get_by_id
/// DELETE /cat/{id}               -> delete
/// PUT    /cat/salary/{id}        -> update_salary
/// PUT    /cat/experience/{id}    -> update_experience
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cat/", get(spy_cat::list).post(spy_cat::create))
        .route("/cat/{id}", get(spy_cat::get_by_id).delete(spy_cat::delete))
        .route("/cat/salary/{id}", put(spy_cat::update_salary))
        .route("/cat/experience/{id}", put(spy_cat::update_experience))
}
