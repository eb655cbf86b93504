//! HTTP-level integration tests for the `/target` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_mission, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

fn target_id(mission: &Value, index: usize) -> String {
    mission["targets"][index]["id"].as_str().unwrap().to_string()
}

async fn complete(pool: &PgPool, uri: String) {
    let response = put_json(build_test_app(pool.clone()), &uri, json!({"completed": true})).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_target_returns_201(pool: PgPool) {
    let mission = create_mission(&pool, &["A"]).await;
    let mission_id = mission["id"].as_str().unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/target/",
        json!({"mission_id": mission_id, "name": "B", "country": "UA", "notes": "rooftop"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let target = body_json(response).await;
    assert_eq!(target["mission_id"], mission_id);
    assert_eq!(target["name"], "B");
    assert_eq!(target["notes"], "rooftop");
    assert_eq!(target["completed"], false);

    let id = target["id"].as_str().unwrap();
    let response = get(build_test_app(pool), &format!("/target/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fourth_target_is_rejected(pool: PgPool) {
    let mission = create_mission(&pool, &["A", "B", "C"]).await;

    let response = post_json(
        build_test_app(pool),
        "/target/",
        json!({"mission_id": mission["id"], "name": "D", "country": "FR"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("more than 3 targets"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_target_to_completed_mission_is_rejected(pool: PgPool) {
    let mission = create_mission(&pool, &["A"]).await;
    let mission_id = mission["id"].as_str().unwrap();
    complete(&pool, format!("/mission/{mission_id}/completed")).await;

    let response = post_json(
        build_test_app(pool),
        "/target/",
        json!({"mission_id": mission_id, "name": "B", "country": "FR"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_target_to_missing_mission_returns_404(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/target/",
        json!({"mission_id": Uuid::new_v4(), "name": "B", "country": "FR"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_target_with_blank_country_returns_400(pool: PgPool) {
    let mission = create_mission(&pool, &["A"]).await;

    let response = post_json(
        build_test_app(pool),
        "/target/",
        json!({"mission_id": mission["id"], "name": "B", "country": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_lock_once_target_completed(pool: PgPool) {
    let mission = create_mission(&pool, &["A", "B"]).await;
    let id = target_id(&mission, 0);

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/target/{id}/notes"),
        json!({"notes": "spotted near the docks"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["notes"], "spotted near the docks");

    complete(&pool, format!("/target/{id}/completed")).await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/target/{id}/notes"),
        json!({"notes": "changed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let target = body_json(get(build_test_app(pool), &format!("/target/{id}")).await).await;
    assert_eq!(target["notes"], "spotted near the docks");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notes_lock_once_mission_completed(pool: PgPool) {
    let mission = create_mission(&pool, &["A"]).await;
    let mission_id = mission["id"].as_str().unwrap();
    let id = target_id(&mission, 0);
    complete(&pool, format!("/mission/{mission_id}/completed")).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/target/{id}/notes"),
        json!({"notes": "late report"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_flag_toggles(pool: PgPool) {
    let mission = create_mission(&pool, &["A"]).await;
    let id = target_id(&mission, 0);

    for completed in [true, false] {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/target/{id}/completed"),
            json!({"completed": completed}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["completed"], completed);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_target_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        &format!("/target/{}/completed", Uuid::new_v4()),
        json!({"completed": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_target_keeps_at_least_one(pool: PgPool) {
    let mission = create_mission(&pool, &["A", "B"]).await;
    let first = target_id(&mission, 0);
    let second = target_id(&mission, 1);

    let response = delete(build_test_app(pool.clone()), &format!("/target/{first}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool.clone()), &format!("/target/{second}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mission_id = mission["id"].as_str().unwrap();
    let response = get(build_test_app(pool), &format!("/mission/{mission_id}")).await;
    let mission = body_json(response).await;
    assert_eq!(mission["targets"].as_array().unwrap().len(), 1);
    assert_eq!(mission["targets"][0]["name"], "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_target_returns_404(pool: PgPool) {
    let response = delete(build_test_app(pool), &format!("/target/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
