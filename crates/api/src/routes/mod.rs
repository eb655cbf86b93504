pub mod breed;
pub mod health;
pub mod mission;
pub mod spy_cat;
pub mod target;

use axum::Router;

use crate::state::AppState;

/// Build the resource routes, mounted at the root alongside `/health`.
///
/// Route tree:
/// ```text
/// /cat/                       list, create
/// /cat/{id}                   get, delete
/// /cat/salary/{id}            update salary
/// /cat/experience/{id}        update experience
///
/// /mission/                   list, create
/// /mission/{id}               get, delete
/// /mission/{id}/completed     set completion flag
/// /mission/{id}/assign        assign or unassign a cat
///
/// /target/                    create (appends to a mission)
/// /target/{id}                get, delete
/// /target/{id}/completed      set completion flag
/// /target/{id}/notes          update notes
///
/// /breed/                     list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(spy_cat::router())
        .merge(mission::router())
        .merge(target::router())
        .merge(breed::router())
}
