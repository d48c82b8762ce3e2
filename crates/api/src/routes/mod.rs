//! HTTP route handlers for the blog API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health            - Liveness check
//! GET    /health/ready      - Readiness check (store reachable)
//!
//! # Posts
//! GET    /posts             - List all posts
//! POST   /posts             - Create a post (201)
//! GET    /posts/{id}        - Fetch one post
//! PUT    /posts/{id}        - Update title/content/author (204)
//! DELETE /posts/{id}        - Delete a post (204)
//! ```

pub mod health;
pub mod posts;

use axum::{
    Router, extract::Request, http::StatusCode, middleware::from_fn, response::Response,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::error::error_response;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the post routes router.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::index).post(posts::create))
        .route(
            "/{id}",
            get(posts::show).put(posts::update).delete(posts::destroy),
        )
}

/// Create all routes for the blog API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/posts", post_routes())
        .fallback(not_found)
}

/// Build the full application with middleware and state attached.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use blog_core::fixtures;

    use super::*;
    use crate::db::PostStore;
    use crate::middleware::REQUEST_ID_HEADER;

    async fn seeded_state(count: usize) -> AppState {
        let url = SecretString::from("memory://routes");
        let store = PostStore::connect(&url).await.unwrap();
        store.insert_many(fixtures::posts(count)).await.unwrap();
        AppState::new(store)
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app(state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_list_returns_all_posts() {
        let state = seeded_state(4).await;
        let (status, body) = send(&state, Method::GET, "/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_show_flattens_author() {
        let state = seeded_state(1).await;
        let post = state.store().find_one().await.unwrap().unwrap();

        let uri = format!("/posts/{}", post.id);
        let (status, body) = send(&state, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], post.title.as_str());
        assert_eq!(body["author"], post.author.full_name().as_str());
    }

    #[tokio::test]
    async fn test_show_malformed_id_is_bad_request() {
        let state = seeded_state(0).await;
        let (status, body) = send(&state, Method::GET, "/posts/12", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("invalid post id"));
    }

    #[tokio::test]
    async fn test_create_missing_field_is_bad_request() {
        let state = seeded_state(0).await;
        let (status, body) = send(
            &state,
            Method::POST,
            "/posts",
            Some(json!({"title": "t", "author": {"firstName": "A", "lastName": "B"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing `content` in request body");
        assert_eq!(state.store().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_sets_location() {
        let state = seeded_state(0).await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "title": "t",
                    "content": "c",
                    "author": {"firstName": "Izzy", "lastName": "West"}
                })
                .to_string(),
            ))
            .unwrap();

        let response = app(state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let post = state.store().find_one().await.unwrap().unwrap();
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("/posts/{}", post.id).as_str()
        );
    }

    #[tokio::test]
    async fn test_update_requires_matching_id() {
        let state = seeded_state(2).await;
        let posts = state.store().list().await.unwrap();
        let (first, second) = (&posts[0], &posts[1]);

        let (status, body) = send(
            &state,
            Method::PUT,
            &format!("/posts/{}", first.id),
            Some(json!({"id": second.id, "title": "Updated title"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("must match"));
        assert_eq!(
            state.store().find_by_id(first.id).await.unwrap().unwrap().title,
            first.title
        );
    }

    #[tokio::test]
    async fn test_update_without_fields_is_bad_request() {
        let state = seeded_state(1).await;
        let post = state.store().find_one().await.unwrap().unwrap();
        let (status, _) = send(
            &state,
            Method::PUT,
            &format!("/posts/{}", post.id),
            Some(json!({"id": post.id})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_post_is_not_found() {
        let state = seeded_state(0).await;
        let id = blog_core::PostId::generate();
        let (status, _) = send(
            &state,
            Method::PUT,
            &format!("/posts/{id}"),
            Some(json!({"id": id, "title": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let state = seeded_state(3).await;
        let post = state.store().find_one().await.unwrap().unwrap();
        let uri = format!("/posts/{}", post.id);

        let (status, body) = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.store().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let state = seeded_state(0).await;
        let (status, body) = send(&state, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Not found");
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let state = seeded_state(0).await;
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_error_body_carries_request_id() {
        let state = seeded_state(0).await;
        let request = Request::builder()
            .uri(format!("/posts/{}", blog_core::PostId::generate()))
            .header(REQUEST_ID_HEADER, "trace-404")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-404");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["requestId"], "trace-404");
    }

    #[tokio::test]
    async fn test_fallback_body_matches_generated_request_id() {
        let state = seeded_state(0).await;
        let request = Request::builder()
            .uri("/nope")
            .header(REQUEST_ID_HEADER, "not a token")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();

        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_owned();
        assert_ne!(header, "not a token");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Not found");
        assert_eq!(body["requestId"], header.as_str());
    }
}
