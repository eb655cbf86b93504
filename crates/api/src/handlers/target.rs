//! Handlers for the `/target` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use spycat_db::models::target::Target;
use spycat_services::mission::CompletedUpdate;
use spycat_services::target::{NewMissionTarget, NotesUpdate};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

/// POST /target/
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewMissionTarget>,
) -> AppResult<(StatusCode, Json<Target>)> {
    let target = state.services.targets.create(&input).await?;
    Ok((StatusCode::CREATED, Json(target)))
}

/// GET /target/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Target>> {
    let target = state.services.targets.get(id).await?;
    Ok(Json(target))
}

/// PUT /target/{id}/completed
pub async fn update_completed(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<CompletedUpdate>,
) -> AppResult<Json<Target>> {
    let target = state
        .services
        .targets
        .update_completed(id, input.completed)
        .await?;
    Ok(Json(target))
}

/// PUT /target/{id}/notes
pub async fn update_notes(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<NotesUpdate>,
) -> AppResult<Json<Target>> {
    let target = state.services.targets.update_notes(id, &input.notes).await?;
    Ok(Json(target))
}

/// DELETE /target/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    state.services.targets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
