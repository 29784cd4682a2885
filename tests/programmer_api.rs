mod common;

use axum::{http::StatusCode, Router};
use common::{create_programmer, send, send_json};
use programmer_api::{app, AppState, PROBLEM_JSON};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn api() -> Router {
    app(AppState::in_memory())
}

#[rstest]
#[tokio::test]
async fn post_creates_programmer_with_location(api: Router) {
    let response = send_json(
        &api,
        "POST",
        "/api/programmers",
        json!({ "nickname": "ObjectOrienter", "avatarNumber": 5, "tagLine": "a test dev!" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let location = response.headers["location"].to_str().unwrap().to_string();
    assert!(location.ends_with("/api/programmers/ObjectOrienter"));
    assert_eq!(response.body["nickname"], "ObjectOrienter");
    assert_eq!(response.body["powerLevel"], 0);

    let followed = send(&api, "GET", &location, None).await;
    assert_eq!(followed.status, StatusCode::OK);
    assert_eq!(followed.body["tagLine"], "a test dev!");
}

#[rstest]
#[tokio::test]
async fn get_programmer_returns_representation(api: Router) {
    create_programmer(&api, json!({ "nickname": "UnitTester", "avatarNumber": 3 })).await;

    let response = send(&api, "GET", "/api/programmers/UnitTester", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/json");
    for key in ["nickname", "avatarNumber", "powerLevel", "tagLine"] {
        assert!(response.body.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(response.body["nickname"], "UnitTester");
    assert_eq!(response.body["tagLine"], serde_json::Value::Null);
}

#[rstest]
#[tokio::test]
async fn list_returns_programmers_in_creation_order(api: Router) {
    create_programmer(&api, json!({ "nickname": "UnitTester", "avatarNumber": 3 })).await;
    create_programmer(&api, json!({ "nickname": "CowboyCoder", "avatarNumber": 5 })).await;

    let response = send(&api, "GET", "/api/programmers", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let programmers = response.body["programmers"].as_array().unwrap();
    assert_eq!(programmers.len(), 2);
    assert_eq!(programmers[0]["nickname"], "UnitTester");
    assert_eq!(programmers[1]["nickname"], "CowboyCoder");
}

#[rstest]
#[tokio::test]
async fn list_is_empty_before_any_create(api: Router) {
    let response = send(&api, "GET", "/api/programmers", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "programmers": [] }));
}

#[rstest]
#[tokio::test]
async fn put_replaces_fields_but_not_nickname(api: Router) {
    create_programmer(
        &api,
        json!({ "nickname": "CowboyCoder", "avatarNumber": 5, "tagLine": "foo" }),
    )
    .await;

    let response = send_json(
        &api,
        "PUT",
        "/api/programmers/CowboyCoder",
        json!({ "nickname": "CowgirlCoder", "avatarNumber": 2, "tagLine": "foo" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["avatarNumber"], 2);
    assert_eq!(response.body["nickname"], "CowboyCoder");

    let renamed = send(&api, "GET", "/api/programmers/CowgirlCoder", None).await;
    assert_eq!(renamed.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn put_resets_missing_fields(api: Router) {
    create_programmer(
        &api,
        json!({ "nickname": "CowboyCoder", "avatarNumber": 5, "tagLine": "foo" }),
    )
    .await;

    let response = send_json(&api, "PUT", "/api/programmers/CowboyCoder", json!({ "avatarNumber": 4 })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["avatarNumber"], 4);
    assert_eq!(response.body["tagLine"], serde_json::Value::Null);
}

#[rstest]
#[tokio::test]
async fn patch_changes_only_supplied_fields(api: Router) {
    create_programmer(
        &api,
        json!({ "nickname": "CowboyCoder", "avatarNumber": 5, "tagLine": "foo" }),
    )
    .await;

    let response = send_json(&api, "PATCH", "/api/programmers/CowboyCoder", json!({ "tagLine": "bar" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["avatarNumber"], 5);
    assert_eq!(response.body["tagLine"], "bar");

    let stored = send(&api, "GET", "/api/programmers/CowboyCoder", None).await;
    assert_eq!(stored.body["tagLine"], "bar");
}

#[rstest]
#[tokio::test]
async fn update_ignores_power_level(api: Router) {
    create_programmer(&api, json!({ "nickname": "CowboyCoder" })).await;

    let response = send_json(&api, "PATCH", "/api/programmers/CowboyCoder", json!({ "powerLevel": 9000 })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["powerLevel"], 0);
}

#[rstest]
#[case("PUT")]
#[case("PATCH")]
#[tokio::test]
async fn update_unknown_programmer_is_404_before_body_parsing(api: Router, #[case] method: &str) {
    let response = send(&api, method, "/api/programmers/fake", Some("{not json")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["detail"], "No programmer found with nickname \"fake\"");
}

#[rstest]
#[tokio::test]
async fn update_with_invalid_avatar_is_validation_error(api: Router) {
    create_programmer(&api, json!({ "nickname": "CowboyCoder", "avatarNumber": 5 })).await;

    let response = send_json(&api, "PATCH", "/api/programmers/CowboyCoder", json!({ "avatarNumber": 42 })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["type"], "validation_error");
    assert_eq!(response.body["errors"]["avatarNumber"][0], "This value is not valid.");

    let stored = send(&api, "GET", "/api/programmers/CowboyCoder", None).await;
    assert_eq!(stored.body["avatarNumber"], 5);
}

#[rstest]
#[tokio::test]
async fn delete_returns_204_whether_or_not_it_existed(api: Router) {
    create_programmer(&api, json!({ "nickname": "UnitTester", "avatarNumber": 3 })).await;

    let first = send(&api, "DELETE", "/api/programmers/UnitTester", None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(first.body, serde_json::Value::Null);

    let second = send(&api, "DELETE", "/api/programmers/UnitTester", None).await;
    assert_eq!(second.status, StatusCode::NO_CONTENT);

    let gone = send(&api, "GET", "/api/programmers/UnitTester", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn missing_nickname_is_a_validation_problem(api: Router) {
    let response = send_json(
        &api,
        "POST",
        "/api/programmers",
        json!({ "avatarNumber": 2, "tagLine": "I'm from a test!" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type(), PROBLEM_JSON);
    assert_eq!(response.body["status"], 400);
    assert_eq!(response.body["type"], "validation_error");
    assert_eq!(response.body["title"], "There was a validation error");
    assert_eq!(response.body["errors"]["nickname"][0], "Please enter a clever nickname");
    assert!(response.body["errors"].get("avatarNumber").is_none());
}

#[rstest]
#[tokio::test]
async fn duplicate_nickname_is_a_validation_problem(api: Router) {
    create_programmer(&api, json!({ "nickname": "UnitTester" })).await;

    let response = send_json(&api, "POST", "/api/programmers", json!({ "nickname": "UnitTester" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["errors"]["nickname"][0],
        "A programmer with that nickname already exists"
    );
}

#[rstest]
#[tokio::test]
async fn invalid_json_is_an_invalid_body_problem(api: Router) {
    let invalid_body = r#"{
    "nickname": "JohnnyRobot",
    "avatarNumber" : "2
    "tagLine": "I'm from a test!"
}"#;

    let response = send(&api, "POST", "/api/programmers", Some(invalid_body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type(), PROBLEM_JSON);
    assert_eq!(response.body["type"], "invalid_body_format");
    assert_eq!(response.body["title"], "Invalid JSON format sent");
    assert!(response.body.get("errors").is_none());
}

#[rstest]
#[case("")]
#[case("[]")]
#[case("\"ObjectOrienter\"")]
#[tokio::test]
async fn non_object_bodies_are_invalid(api: Router, #[case] body: &str) {
    let response = send(&api, "POST", "/api/programmers", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["type"], "invalid_body_format");
}

#[rstest]
#[tokio::test]
async fn unknown_programmer_is_a_404_problem(api: Router) {
    let response = send(&api, "GET", "/api/programmers/fake", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.content_type(), PROBLEM_JSON);
    assert_eq!(response.body["type"], "about:blank");
    assert_eq!(response.body["title"], "Not Found");
    assert_eq!(response.body["detail"], "No programmer found with nickname \"fake\"");
}

#[rstest]
#[tokio::test]
async fn nicknames_with_spaces_round_trip_through_location(api: Router) {
    let created = create_programmer(&api, json!({ "nickname": "Cowboy Coder" })).await;
    let location = created.headers["location"].to_str().unwrap().to_string();
    assert_eq!(location, "/api/programmers/Cowboy%20Coder");

    let followed = send(&api, "GET", &location, None).await;
    assert_eq!(followed.status, StatusCode::OK);
    assert_eq!(followed.body["nickname"], "Cowboy Coder");
}
