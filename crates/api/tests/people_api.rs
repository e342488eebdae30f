//! HTTP-level integration tests for `/people` and `/people/{id}/visits`.

mod common;

use axum::http::StatusCode;
use common::{
    add_visit, body_json, create_location, create_person, delete_auth, get_auth, put_json_auth,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;

fn person(first: &str, last: &str) -> serde_json::Value {
    json!({ "first_name": first, "last_name": last })
}

// ---------------------------------------------------------------------------
// People CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_person_trims_names(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let home = create_location(app.clone(), &token, "Home", "Lisbon").await;

    let body = json!({
        "first_name": "  Rosa ",
        "last_name": "Lima",
        "birth_date": "1990-04-12",
        "home_location_id": home,
    });
    let id = create_person(app.clone(), &token, body).await;

    let response = get_auth(app, &format!("/api/v1/people/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Rosa");
    assert_eq!(json["data"]["birth_date"], "1990-04-12");
    assert_eq!(json["data"]["home_location_id"], home);
    assert!(json["data"]["visits"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_person_rejects_blank_name_and_foreign_home(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ada = token_for(app.clone(), "ada").await;
    let bob = token_for(app.clone(), "bob").await;
    let bobs_home = create_location(app.clone(), &bob, "Home", "Faro").await;

    let response = common::post_json_auth(
        app.clone(),
        "/api/v1/people",
        json!({ "first_name": "", "last_name": "Lima" }),
        &ada,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "first_name": "Rosa", "last_name": "Lima", "home_location_id": bobs_home });
    let response = common::post_json_auth(app, "/api/v1/people", body, &ada).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_people_includes_visit_count(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let rosa = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    create_person(app.clone(), &token, person("Joao", "Alves")).await;
    add_visit(app.clone(), &token, rosa, loc, "2023-01-01", Some("2023-01-05")).await;
    add_visit(app.clone(), &token, rosa, loc, "2023-02-01", None).await;

    let response = get_auth(app, "/api/v1/people", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let people = json["data"].as_array().unwrap();
    assert_eq!(people.len(), 2);
    // Ordered by last name.
    assert_eq!(people[0]["last_name"], "Alves");
    assert_eq!(people[0]["visit_count"], 0);
    assert_eq!(people[1]["last_name"], "Lima");
    assert_eq!(people[1]["visit_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_people(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    create_person(app.clone(), &token, person("Joao", "Alves")).await;

    let response = get_auth(app.clone(), "/api/v1/people/search?q=ROS", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let found = json["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["first_name"], "Rosa");

    let response = get_auth(app.clone(), "/api/v1/people/search?q=alv", &token).await;
    assert_eq!(body_json(response).await["data"][0]["last_name"], "Alves");

    let response = get_auth(app.clone(), "/api/v1/people/search?q=%25", &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let response = get_auth(app, "/api/v1/people/search?q=%20", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_person(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    let uri = format!("/api/v1/people/{id}");

    let body = json!({ "birth_date": "1985-07-30", "notes": "cousin" });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Rosa");
    assert_eq!(json["data"]["birth_date"], "1985-07-30");
    assert_eq!(json["data"]["notes"], "cousin");

    let response = put_json_auth(app, &uri, json!({ "last_name": " " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_person_null_clears_birth_date_and_home(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let home = create_location(app.clone(), &token, "Home", "Lisbon").await;
    let body = json!({
        "first_name": "Rosa",
        "last_name": "Lima",
        "birth_date": "2020-01-01",
        "home_location_id": home,
    });
    let id = create_person(app.clone(), &token, body).await;
    let uri = format!("/api/v1/people/{id}");

    // Absent keys leave the values alone.
    let response = put_json_auth(app.clone(), &uri, json!({ "notes": "aunt" }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["birth_date"], "2020-01-01");
    assert_eq!(json["data"]["home_location_id"], home);

    let body = json!({ "birth_date": null, "home_location_id": null });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["birth_date"].is_null());
    assert!(json["data"]["home_location_id"].is_null());
    assert_eq!(json["data"]["notes"], "aunt");

    let response = get_auth(app, &format!("{uri}/timeline"), &token).await;
    let json = body_json(response).await;
    assert!(json["data"]["days_alive"].is_null());
    assert!(json["data"]["events"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_person_removes_visits(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    add_visit(app.clone(), &token, id, loc, "2023-01-01", None).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/people/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person_visits WHERE person_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // The location is free to delete once nobody visits it.
    let response = delete_auth(app, &format!("/api/v1/locations/{loc}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_people_are_scoped_to_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ada = token_for(app.clone(), "ada").await;
    let bob = token_for(app.clone(), "bob").await;
    let id = create_person(app.clone(), &ada, person("Rosa", "Lima")).await;

    let response = get_auth(app.clone(), &format!("/api/v1/people/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/people/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Visits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_visits_listed_newest_first_with_location(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let faro = create_location(app.clone(), &token, "Beach", "Faro").await;
    let porto = create_location(app.clone(), &token, "Office", "Porto").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    add_visit(app.clone(), &token, id, faro, "2023-01-01", Some("2023-01-05")).await;
    add_visit(app.clone(), &token, id, porto, "2023-03-01", None).await;

    let response = get_auth(app, &format!("/api/v1/people/{id}"), &token).await;

    let json = body_json(response).await;
    let visits = json["data"]["visits"].as_array().unwrap();
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[0]["location_city"], "Porto");
    assert!(visits[0]["end_date"].is_null());
    assert_eq!(visits[1]["location_name"], "Beach");
    assert_eq!(visits[1]["end_date"], "2023-01-05");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overlapping_visit_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;

    let response = add_visit(app.clone(), &token, id, loc, "2023-01-01", Some("2023-01-10")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = add_visit(app.clone(), &token, id, loc, "2023-01-05", Some("2023-01-12")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    // Touching on the boundary day is allowed.
    let response = add_visit(app.clone(), &token, id, loc, "2023-01-10", Some("2023-01-12")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // A different person may be there at the same time.
    let other = create_person(app.clone(), &token, person("Joao", "Alves")).await;
    let response = add_visit(app, &token, other, loc, "2023-01-03", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_visit_end_before_start_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;

    let response = add_visit(app, &token, id, loc, "2023-01-10", Some("2023-01-01")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_visit_to_foreign_location_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ada = token_for(app.clone(), "ada").await;
    let bob = token_for(app.clone(), "bob").await;
    let bobs_loc = create_location(app.clone(), &bob, "Beach", "Faro").await;
    let id = create_person(app.clone(), &ada, person("Rosa", "Lima")).await;

    let response = add_visit(app, &ada, id, bobs_loc, "2023-01-01", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_visit_checks_overlap_against_others_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    let first = add_visit(app.clone(), &token, id, loc, "2023-01-01", Some("2023-01-05")).await;
    let first_id = body_json(first).await["data"]["id"].as_i64().unwrap();
    add_visit(app.clone(), &token, id, loc, "2023-02-01", Some("2023-02-05")).await;
    let uri = format!("/api/v1/people/{id}/visits/{first_id}");

    // Extending into its own old range is fine.
    let response = put_json_auth(app.clone(), &uri, json!({ "end_date": "2023-01-20" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["end_date"], "2023-01-20");

    // Extending into the next visit is not.
    let response = put_json_auth(app, &uri, json!({ "end_date": "2023-02-03" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_visit_null_end_date_makes_it_single_day(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let id = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    let created = add_visit(app.clone(), &token, id, loc, "2023-01-01", Some("2023-01-05")).await;
    let visit_id = body_json(created).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/people/{id}/visits/{visit_id}");

    let response = put_json_auth(app.clone(), &uri, json!({ "notes": "surf" }), &token).await;
    assert_eq!(body_json(response).await["data"]["end_date"], "2023-01-05");

    let response = put_json_auth(app.clone(), &uri, json!({ "end_date": null }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["end_date"].is_null());
    assert_eq!(json["data"]["notes"], "surf");

    // The freed days can now hold another visit.
    let response = add_visit(app.clone(), &token, id, loc, "2023-01-02", Some("2023-01-04")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Moving the start past the other visit is checked against the cleared end.
    let body = json!({ "start_date": "2023-01-03" });
    let response = put_json_auth(app, &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_visit_removes_only_that_visit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for(app.clone(), "ada").await;
    let loc = create_location(app.clone(), &token, "Beach", "Faro").await;
    let rosa = create_person(app.clone(), &token, person("Rosa", "Lima")).await;
    let joao = create_person(app.clone(), &token, person("Joao", "Alves")).await;
    let visit = add_visit(app.clone(), &token, rosa, loc, "2023-01-01", None).await;
    let visit_id = body_json(visit).await["data"]["id"].as_i64().unwrap();
    add_visit(app.clone(), &token, rosa, loc, "2023-03-01", None).await;
    add_visit(app.clone(), &token, joao, loc, "2023-01-01", None).await;

    // The visit belongs to Rosa, not Joao.
    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/people/{joao}/visits/{visit_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/people/{rosa}/visits/{visit_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), "/api/v1/people", &token).await;
    let json = body_json(response).await;
    let counts: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["visit_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![1, 1]);
}
