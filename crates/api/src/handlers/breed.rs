//! Handlers for the `/breed` resource (read-only; rows come from catalog sync).

use axum::extract::State;
use axum::Json;
use spycat_db::models::breed::Breed;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /breed/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Breed>>> {
    let breeds = state.services.breeds.list().await?;
    Ok(Json(breeds))
}
