mod common;

use shortlink::prelude::*;
use std::time::Duration;

#[tokio::test]
async fn test_redirect_success() {
    let (_dir, shortener) = common::open_shortener();
    let id = shortener
        .post("example.com", PostOptions::default())
        .await
        .unwrap();
    let server = common::create_test_server(shortener);

    let response = server.get(&format!("/r/{}", id)).await;

    assert_eq!(response.status_code(), 301);
    let location = response.header("location");
    assert_eq!(location, "http://example.com");
}

#[tokio::test]
async fn test_redirect_preserves_path_and_query() {
    let (_dir, shortener) = common::open_shortener();
    let id = shortener
        .post(
            "https://example.com/target?x=1&y=two",
            PostOptions::default(),
        )
        .await
        .unwrap();
    let server = common::create_test_server(shortener);

    let response = server.get(&format!("/r/{}", id)).await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://example.com/target?x=1&y=two"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (_dir, shortener) = common::open_shortener();
    let server = common::create_test_server(shortener);

    let response = server.get("/r/unknown").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["id"], "unknown");
}

#[tokio::test]
async fn test_redirect_expired_link_is_not_found() {
    let (_dir, shortener) = common::open_shortener();
    let id = shortener
        .post(
            "https://example.com",
            PostOptions::default().with_ttl(Duration::from_millis(50)),
        )
        .await
        .unwrap();
    let server = common::create_test_server(shortener);

    tokio::time::sleep(Duration::from_millis(100)).await;

    server
        .get(&format!("/r/{}", id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_after_close_is_internal_error() {
    let (_dir, shortener) = common::open_shortener();
    let id = shortener
        .post("https://example.com", PostOptions::default())
        .await
        .unwrap();
    shortener.close().await.unwrap();
    let server = common::create_test_server(shortener);

    let response = server.get(&format!("/r/{}", id)).await;

    assert_eq!(response.status_code(), 500);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
}

#[tokio::test]
async fn test_redirect_requires_id_segment() {
    let (_dir, shortener) = common::open_shortener();
    let server = common::create_test_server(shortener);

    server.get("/r/a/b").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_trailing_slash_is_optional() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use shortlink::routes::app_router;
    use shortlink::state::AppState;
    use tower::ServiceExt;

    let (_dir, shortener) = common::open_shortener();
    let id = shortener
        .post("example.com", PostOptions::default())
        .await
        .unwrap();
    let app = app_router(AppState::new(shortener));

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/r/{}/", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "http://example.com");
}
