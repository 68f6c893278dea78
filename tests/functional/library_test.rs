//! Functional tests for the library, static file and health routes

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::common::{get, send, send_json, test_app};

const NO_PROVIDER: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(NO_PROVIDER, dir.path());

    let (status, body) = send_json(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "message": "Media relay running" }));
}

#[tokio::test]
async fn test_library_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(NO_PROVIDER, dir.path());

    let (status, body) = send_json(app, get("/api/library")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "files": [] }));
}

#[tokio::test]
async fn test_library_missing_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(NO_PROVIDER, &dir.path().join("never-created"));

    let (status, body) = send_json(app, get("/api/library")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "files": [] }));
}

#[tokio::test]
async fn test_library_lists_only_media() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["0123456789.png", "abcdefabcd.mp4", "shot.JPG", "readme.txt", "clip.webm"] {
        std::fs::write(dir.path().join(name), b"data").unwrap();
    }

    let app = test_app(NO_PROVIDER, dir.path());
    let (status, body) = send_json(app, get("/api/library")).await;

    assert_eq!(status, StatusCode::OK);
    let mut files: Vec<String> = serde_json::from_value(body["files"].clone()).unwrap();
    files.sort();
    assert_eq!(
        files,
        vec![
            "/output/0123456789.png",
            "/output/abcdefabcd.mp4",
            "/output/shot.JPG",
        ]
    );
}

#[tokio::test]
async fn test_serve_stored_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0a0a0a0a0a.png"), b"\x89PNG").unwrap();

    let app = test_app(NO_PROVIDER, dir.path());
    let response = app.oneshot(get("/output/0a0a0a0a0a.png")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"\x89PNG");
}

#[tokio::test]
async fn test_serve_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(NO_PROVIDER, dir.path());

    let (status, _) = send(app, get("/output/ffffffffff.mp4")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_rejects_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("output");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(dir.path().join("secret.png"), b"secret").unwrap();

    let app = test_app(NO_PROVIDER, &store);
    let (status, body) = send(app, get("/output/../secret.png")).await;

    assert_ne!(status, StatusCode::OK);
    assert_ne!(body, b"secret");
}

#[tokio::test]
async fn test_cors_preflight() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(NO_PROVIDER, dir.path());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-user-id")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
