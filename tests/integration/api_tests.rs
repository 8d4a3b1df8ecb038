//! API integration tests
//!
//! Drive the full router in-process against the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_server::{
    api,
    config::{AppConfig, StoreBackend, UpdateMissPolicy},
    repository::Repository,
    AppState,
};

fn app_with(update_miss: UpdateMissPolicy) -> Router {
    let mut config = AppConfig::default();
    config.database.backend = StoreBackend::Memory;
    config.persistence.update_miss = update_miss;
    api::router(AppState::new(config, Repository::in_memory()))
}

fn app() -> Router {
    app_with(UpdateMissPolicy::Reject)
}

/// Send a request and return the status with the parsed body (Null if empty)
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn ann_with_books() -> Value {
    json!({
        "userRequest": {"fullName": "Ann", "title": "reader", "age": 30},
        "bookRequests": [
            {"title": "A", "author": "X", "pageCount": 100},
            {"title": "B", "author": "Y", "pageCount": 200}
        ]
    })
}

fn ids(body: &Value) -> Vec<i64> {
    body["booksIdList"]
        .as_array()
        .expect("No book id list")
        .iter()
        .map(|id| id.as_i64().expect("Book id is not a number"))
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn test_create_user_with_books() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/v1/user", Some(ann_with_books())).await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = created["userId"].as_i64().expect("No user ID");
    let book_ids = ids(&created);
    assert_eq!(book_ids.len(), 2);

    for (id, title) in book_ids.iter().zip(["A", "B"]) {
        let (status, book) = send(&app, Method::GET, &format!("/api/v1/books/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(book["title"], title);
        assert_eq!(book["userId"], user_id);
    }

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/user/{}", user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_without_books_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        Some(json!({"userRequest": {"fullName": "Ann", "title": "reader", "age": 30}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, all) = send(&app, Method::GET, "/api/v1/user", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_create_with_invalid_age_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        Some(json!({
            "userRequest": {"fullName": "Ann", "title": "reader", "age": 0},
            "bookRequests": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("age"));
}

#[tokio::test]
async fn test_update_lists_all_owned_books() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/user", Some(ann_with_books())).await;
    let user_id = created["userId"].as_i64().expect("No user ID");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/user/{}", user_id),
        Some(json!({
            "userRequest": {"fullName": "Ann", "title": "writer", "age": 31},
            "bookRequests": [{"title": "C", "author": "Z", "pageCount": 300}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["userId"], user_id);

    let updated_ids = ids(&updated);
    assert_eq!(updated_ids.len(), 3);
    assert_eq!(&updated_ids[..2], ids(&created).as_slice());

    let (_, books) = send(&app, Method::GET, &format!("/api/v1/user/{}/books", user_id), None).await;
    assert_eq!(books.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_update_missing_user() {
    let request = json!({
        "userRequest": {"fullName": "Ann", "title": "reader", "age": 30},
        "bookRequests": []
    });

    let (status, _) = send(&app(), Method::PUT, "/api/v1/user/5", Some(request.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // under the insert policy the payload becomes a new user with its own id
    let app = app_with(UpdateMissPolicy::Insert);
    let (status, body) = send(&app, Method::PUT, "/api/v1/user/5", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], 5);
    let (_, all) = send(&app, Method::GET, "/api/v1/user", None).await;
    assert_eq!(all, json!([{"userId": 1, "booksIdList": []}]));
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/user/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_list_all_users() {
    let app = app();
    let (_, ann) = send(&app, Method::POST, "/api/v1/user", Some(ann_with_books())).await;
    let (_, bob) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        Some(json!({
            "userRequest": {"fullName": "Bob", "title": "reader", "age": 40},
            "bookRequests": []
        })),
    )
    .await;

    let (status, all) = send(&app, Method::GET, "/api/v1/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([ann, bob]));
}

#[tokio::test]
async fn test_delete_user_with_books() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/v1/user", Some(ann_with_books())).await;
    let user_id = created["userId"].as_i64().expect("No user ID");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/user/{}", user_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/user/{}", user_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for id in ids(&created) {
        let (status, _) = send(&app, Method::GET, &format!("/api/v1/books/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_update_and_delete_book() {
    let app = app();
    let (_, ann) = send(&app, Method::POST, "/api/v1/user", Some(ann_with_books())).await;
    let (_, bob) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        Some(json!({
            "userRequest": {"fullName": "Bob", "title": "reader", "age": 40},
            "bookRequests": []
        })),
    )
    .await;
    let book_id = ids(&ann)[0];

    // hand the book over to Bob
    let (status, book) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/books/{}", book_id),
        Some(json!({"title": "A2", "author": "X", "pageCount": 120, "userId": bob["userId"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "A2");
    assert_eq!(book["userId"], bob["userId"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/books/{}", book_id),
        Some(json!({"title": "A2", "author": "X", "pageCount": 120, "userId": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_over_long_name_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        Some(json!({
            "userRequest": {"fullName": "x".repeat(256), "title": "reader", "age": 30},
            "bookRequests": [{"title": "A", "author": "X", "pageCount": 100}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, all) = send(&app, Method::GET, "/api/v1/user", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_mistyped_body_is_rejected_before_any_write() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/user")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "userRequest": {"fullName": "Ann", "title": "reader", "age": "thirty"},
                "bookRequests": []
            })
            .to_string(),
        ))
        .expect("Failed to build request");
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, all) = send(&app, Method::GET, "/api/v1/user", None).await;
    assert_eq!(all, json!([]));
}
