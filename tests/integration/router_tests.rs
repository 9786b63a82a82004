//! Router tests driving the axum app in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use book_api_server::{api::create_router, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn dune(year: i64) -> Value {
    json!({"id": 1, "title": "Dune", "author": "Herbert", "published_year": year})
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(dune(1965))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, dune(1965));

    let (status, body) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, dune(1965));

    let (status, body) = send(&app, Method::PUT, "/books/1", Some(dune(1966))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, dune(1966));

    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/books/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadValue");
    }

    let (status, _) = send(&app, Method::PUT, "/books/abc", Some(dune(1965))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_on_trailing_slash() {
    let app = app();

    let (status, _) = send(&app, Method::POST, "/books/", Some(dune(1965))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([dune(1965)]));
}

#[tokio::test]
async fn test_create_rejects_invalid_data() {
    let app = app();

    let invalid = [
        json!({"id": 1, "title": "", "author": "Herbert", "published_year": 1965}),
        json!({"id": 1, "title": "Dune", "author": "", "published_year": 1965}),
        json!({"id": 1, "title": "Dune", "author": "Herbert", "published_year": 0}),
        json!({"id": 1, "title": "Dune", "author": "Herbert"}),
        json!({"id": -1, "title": "Dune", "author": "Herbert", "published_year": 1965}),
        json!({"title": "Dune", "author": "Herbert", "published_year": 1965}),
    ];

    for payload in invalid {
        let (status, body) = send(&app, Method::POST, "/books", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} accepted", payload);
        assert_eq!(body["error"], "BadValue");
    }

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header("content-type", "application/json")
        .body(Body::from("{\"id\": 1, \"title\":"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"id": "one", "title": "Dune", "author": "Herbert", "published_year": 1965})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let app = app();

    send(&app, Method::POST, "/books", Some(dune(1965))).await;
    let (status, body) = send(&app, Method::POST, "/books", Some(dune(1984))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Duplicate");

    let (_, body) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(body, dune(1965));
}

#[tokio::test]
async fn test_update_rules() {
    let app = app();

    let (status, _) = send(&app, Method::PUT, "/books/1", Some(dune(1966))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, Method::POST, "/books", Some(dune(1965))).await;
    let other = json!({"id": 2, "title": "Emma", "author": "Austen", "published_year": 1815});
    send(&app, Method::POST, "/books", Some(other.clone())).await;

    // Path and body ids disagree
    let (status, _) = send(&app, Method::PUT, "/books/2", Some(dune(1966))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/1",
        Some(json!({"id": 1, "title": "Dune", "author": "", "published_year": 1966})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/books/1", Some(dune(1966))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body, json!([dune(1966), other]));
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_creates() {
    let app = app();
    let n = 50;

    let handles: Vec<_> = (1..=n)
        .map(|id| {
            let app = app.clone();
            tokio::spawn(async move {
                let payload = json!({
                    "id": id,
                    "title": format!("Book {}", id),
                    "author": "Anonymous",
                    "published_year": 2000
                });
                send(&app, Method::POST, "/books", Some(payload)).await.0
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body.as_array().unwrap().len(), n as usize);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    send(&app, Method::POST, "/books", Some(dune(1965))).await;
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books/{id}"].is_object());
}
