//! Handlers for the `/mission` resource.
//!
//! Missions are always returned with their targets embedded, ordered as
//! they were supplied.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use spycat_db::models::mission::Mission;
use spycat_services::mission::{AssignCat, CompletedUpdate, NewMission};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

/// POST /mission/
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewMission>,
) -> AppResult<(StatusCode, Json<Mission>)> {
    let mission = state.services.missions.create(&input).await?;
    Ok((StatusCode::CREATED, Json(mission)))
}

/// GET /mission/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Mission>>> {
    let missions = state.services.missions.list().await?;
    Ok(Json(missions))
}

/// GET /mission/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Mission>> {
    let mission = state.services.missions.get(id).await?;
    Ok(Json(mission))
}

/// PUT /mission/{id}/completed
pub async fn update_completed(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<CompletedUpdate>,
) -> AppResult<Json<Mission>> {
    let mission = state
        .services
        .missions
        .update_completed(id, input.completed)
        .await?;
    Ok(Json(mission))
}

/// PUT /mission/{id}/assign
///
/// `{"cat_id": null}` unassigns.
pub async fn assign_cat(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<AssignCat>,
) -> AppResult<Json<Mission>> {
    let mission = state.services.missions.assign_cat(id, input.cat_id).await?;
    Ok(Json(mission))
}

/// DELETE /mission/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    state.services.missions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
