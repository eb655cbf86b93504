//! Handlers for the `/cat` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use spycat_db::models::spy_cat::SpyCat;
use spycat_services::spy_cat::{ExperienceUpdate, NewSpyCat, SalaryUpdate};

use crate::error::AppResult;
use crate::extract::{IdPath, ValidJson};
use crate::state::AppState;

/// POST /cat/
///
/// `breed` is matched by name against the synced catalog; an unknown breed is a 404.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<NewSpyCat>,
) -> AppResult<(StatusCode, Json<SpyCat>)> {
    let cat = state.services.cats.create(&input).await?;
    Ok((StatusCode::CREATED, Json(cat)))
}

/// GET /cat/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<SpyCat>>> {
    let cats = state.services.cats.list().await?;
    Ok(Json(cats))
}

/// GET /cat/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<SpyCat>> {
    let cat = state.services.cats.get(id).await?;
    Ok(Json(cat))
}

/// PUT /cat/salary/{id}
pub async fn update_salary(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<SalaryUpdate>,
) -> AppResult<Json<SpyCat>> {
    let cat = state.services.cats.update_salary(id, input.salary).await?;
    Ok(Json(cat))
}

/// PUT /cat/experience/{id}
pub async fn update_experience(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<ExperienceUpdate>,
) -> AppResult<Json<SpyCat>> {
    let cat = state
        .services
        .cats
        .update_experience(id, input.years_experience)
        .await?;
    Ok(Json(cat))
}

/// DELETE /cat/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    state.services.cats.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
