//! End-to-end request flows through the full application router.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tasker_server::{API_BASE, build_router};
use tasker_store::TaskStore;
use tower::ServiceExt;

async fn call(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(format!("{API_BASE}{path}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |v| Body::from(v.to_string())))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn daily_task_lifecycle() {
    let app = build_router(TaskStore::in_memory().unwrap());

    let (status, created) = call(&app, Method::POST, "/daily", Some(json!({"name": "Buy milk"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Buy milk");
    assert_eq!(created["completed"], false);

    let (status, listed) = call(&app, Method::GET, "/daily", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(listed["tasks"][0]["id"], 1);

    let (status, updated) = call(
        &app,
        Method::PUT,
        "/daily/1",
        Some(json!({"name": "Buy milk", "completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert!(updated["lastUpdated"].as_str().unwrap() > created["lastUpdated"].as_str().unwrap());

    let (status, _) = call(&app, Method::DELETE, "/daily/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, "/daily/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = call(&app, Method::GET, "/daily", None).await;
    assert_eq!(listed, json!({"tasks": []}));
}

#[tokio::test]
async fn clearing_completed_returns_the_rest() {
    let app = build_router(TaskStore::in_memory().unwrap());
    for (name, completed) in [("Test1", true), ("Test2", false), ("Test3", true)] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/daily",
            Some(json!({"name": name, "completed": completed})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, remaining) = call(&app, Method::DELETE, "/daily/completed", None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = remaining["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "Test2");
    assert_eq!(tasks[0]["id"], 2);
}

#[tokio::test]
async fn case_variant_category_is_rejected() {
    let app = build_router(TaskStore::in_memory().unwrap());
    let (status, body) = call(&app, Method::POST, "/Daily", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (_, listed) = call(&app, Method::GET, "/daily", None).await;
    assert_eq!(listed, json!({"tasks": []}));
}

#[tokio::test]
async fn missing_path_segments_are_bad_requests() {
    let app = build_router(TaskStore::in_memory().unwrap());
    let cases = [
        (Method::DELETE, "/daily", "Task id required."),
        (Method::DELETE, "/daily/", "Task id required."),
        (Method::PUT, "/daily", "Task id required."),
        (Method::PUT, "/daily/", "Task id required."),
        (Method::GET, "", "Task type required."),
        (Method::GET, "/", "Task type required."),
    ];
    for (method, path, message) in cases {
        let (status, body) = call(&app, method.clone(), path, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {API_BASE}{path}");
        assert_eq!(body["message"], message, "{method} {API_BASE}{path}");
    }
}
