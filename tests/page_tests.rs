//! Router-level tests for the server-rendered pages.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use inkpot::config::Config;
use inkpot::db::NewPost;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<inkpot::api::AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = inkpot::api::create_app_state_from_config(config)
        .await
        .expect("failed to create app state");
    let router = inkpot::api::router(state.clone());

    (state, router)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn comment_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/comment")
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn home_lists_posts_newest_first() {
    let (state, app) = spawn_app().await;

    for title in ["First post", "Second post"] {
        state
            .store()
            .create_post(NewPost {
                title: title.to_string(),
                content: "body".to_string(),
            })
            .await
            .unwrap();
    }

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let second = body.find("Second post").expect("missing newest post");
    let first = body.find("First post").expect("missing oldest post");
    assert!(second < first, "newest post should render first");
}

#[tokio::test]
async fn home_renders_with_no_posts() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("No posts yet"));
}

#[tokio::test]
async fn missing_post_is_404() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/post/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_post_id_is_a_client_error() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/post/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn comment_submission_redirects_and_renders() {
    let (state, app) = spawn_app().await;

    let post = state
        .store()
        .create_post(NewPost {
            title: "Commentable".to_string(),
            content: "body".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(comment_request(&format!(
            "post_id={}&commenter_name=Ada&content=Nice+post",
            post.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        format!("/post/{}", post.id)
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/post/{}", post.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Ada"));
    assert!(body.contains("Nice post"));
}

#[tokio::test]
async fn blank_comment_fields_are_rejected() {
    let (state, app) = spawn_app().await;

    let post = state
        .store()
        .create_post(NewPost {
            title: "Post".to_string(),
            content: "body".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(comment_request(&format!(
            "post_id={}&commenter_name=&content=hello",
            post.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(comment_request(&format!(
            "post_id={}&commenter_name=Ada&content=",
            post.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_on_missing_post_is_404() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(comment_request(
            "post_id=999&commenter_name=Ada&content=hello",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_comment_body_is_a_client_error() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(comment_request(
            "post_id=not-a-number&commenter_name=Ada&content=hello",
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn app_state_shares_the_loaded_config() {
    let (state, _app) = spawn_app().await;

    let config = state.config().read().await;
    assert_eq!(config.general.database_path, "sqlite::memory:");
    assert_eq!(config.server.port, 8080);
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
}
