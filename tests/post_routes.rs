//! Router-level tests for the /hoots resource.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{add_comment, create_hoot, send, sign_up, test_app};

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/hoots", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/hoots",
        None,
        Some(json!({ "title": "t", "text": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/hoots", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_sets_author_from_token() {
    let app = test_app();
    let (token, user_id) = sign_up(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/hoots",
        Some(&token),
        Some(json!({
            "title": "First",
            "text": "Hello",
            "category": "News",
            "author": "00000000-0000-0000-0000-000000000000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "First");
    assert_eq!(body["category"], "News");
    assert_eq!(body["author"]["_id"], user_id.as_str());
    assert_eq!(body["author"]["username"], "alice");
    assert_eq!(body["comments"], json!([]));
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_missing_title_is_server_error() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/hoots",
        Some(&token),
        Some(json!({ "text": "no title" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, list) = send(&app, Method::GET, "/hoots", Some(&token), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;

    let first = create_hoot(&app, &token, "one").await;
    let second = create_hoot(&app, &token, "two").await;
    let third = create_hoot(&app, &token, "three").await;

    let (status, body) = send(&app, Method::GET, "/hoots", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn test_show_hydrates_post_and_comment_authors() {
    let app = test_app();
    let (alice, alice_id) = sign_up(&app, "alice").await;
    let (bob, bob_id) = sign_up(&app, "bob").await;

    let hoot = create_hoot(&app, &alice, "post").await;
    add_comment(&app, &bob, &hoot, "nice").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/hoots/{}", hoot),
        Some(&alice),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["_id"], alice_id.as_str());
    assert_eq!(body["comments"][0]["author"]["_id"], bob_id.as_str());
    assert_eq!(body["comments"][0]["author"]["username"], "bob");
    assert_eq!(body["comments"][0]["text"], "nice");
}

#[tokio::test]
async fn test_unknown_or_malformed_id_is_not_found() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;
    let missing = "6d1f0f43-8d54-4b0c-9e42-0b5b1d3f6a10";

    for uri in [
        format!("/hoots/{}", missing),
        "/hoots/not-an-id".to_string(),
    ] {
        let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/hoots/{}/comments", missing),
        Some(&token),
        Some(json!({ "text": "hello?" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_on_unknown_hoot_without_text_is_not_found() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/hoots/6d1f0f43-8d54-4b0c-9e42-0b5b1d3f6a10/comments",
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Known hoot, missing text: still a store rejection
    let hoot = create_hoot(&app, &token, "post").await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/hoots/{}/comments", hoot),
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = test_app();
    let (token, user_id) = sign_up(&app, "alice").await;
    let hoot = create_hoot(&app, &token, "post").await;

    let (status, comment) = send(
        &app,
        Method::POST,
        &format!("/hoots/{}/comments", hoot),
        Some(&token),
        Some(json!({ "text": "c1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["text"], "c1");
    assert_eq!(comment["author"]["_id"], user_id.as_str());
    let c1 = comment["_id"].as_str().unwrap().to_string();

    let c2 = add_comment(&app, &token, &hoot, "c2").await;

    // New comments land at the end
    let (_, body) = send(&app, Method::GET, &format!("/hoots/{}", hoot), Some(&token), None).await;
    assert_eq!(body["comments"][0]["_id"], c1.as_str());
    assert_eq!(body["comments"][1]["_id"], c2.as_str());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/hoots/{}/comments/{}", hoot, c1),
        Some(&token),
        Some(json!({ "text": "edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ok");

    let (_, body) = send(&app, Method::GET, &format!("/hoots/{}", hoot), Some(&token), None).await;
    assert_eq!(body["comments"][0]["text"], "edited");
    assert_eq!(body["comments"][0]["_id"], c1.as_str());
    assert_eq!(body["comments"][0]["author"]["_id"], user_id.as_str());
    assert_eq!(body["comments"][1]["text"], "c2");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/hoots/{}/comments/{}", hoot, c1),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Ok");

    let (_, body) = send(&app, Method::GET, &format!("/hoots/{}", hoot), Some(&token), None).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["_id"], c2.as_str());
}

#[tokio::test]
async fn test_unknown_comment_is_not_found() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;
    let hoot = create_hoot(&app, &token, "post").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/hoots/{}/comments/6d1f0f43-8d54-4b0c-9e42-0b5b1d3f6a10", hoot),
        Some(&token),
        Some(json!({ "text": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/hoots/{}/comments/garbage", hoot),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_count_operations() {
    let app = test_app();
    let (token, _) = sign_up(&app, "alice").await;
    let hoot = create_hoot(&app, &token, "post").await;
    add_comment(&app, &token, &hoot, "c").await;

    // Validation failure counts as a failed request
    send(&app, Method::POST, "/hoots", Some(&token), Some(json!({}))).await;

    let (status, body) = send(&app, Method::GET, "/observability/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts_created"], 1);
    assert_eq!(body["comments_added"], 1);
    assert_eq!(body["failed_requests"], 1);
}
