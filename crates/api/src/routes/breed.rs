use axum::routing::get;
use axum::Router;

use crate::handlers::breed;
use crate::state::AppState;

/// ```text
/// GET /breed/    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/breed/", get(breed::list))
}
