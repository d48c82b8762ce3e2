//! Post resource handlers.
//!
//! Responses flatten the stored author document into a display name, so a
//! post is returned as `{ id, title, content, author: "First Last" }`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use blog_core::{Author, NewPost, Post, PostId, PostUpdate};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Post representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author.full_name(),
            title: post.title,
            content: post.content,
        }
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = AppError;

    fn try_from(req: CreatePostRequest) -> Result<Self> {
        let title = req.title.ok_or_else(|| missing_field("title"))?;
        let content = req.content.ok_or_else(|| missing_field("content"))?;
        let author = req.author.ok_or_else(|| missing_field("author"))?;
        Ok(Self::new(title, content, author)?)
    }
}

/// Body of `PUT /posts/{id}`.
///
/// `id` must repeat the path id. The remaining fields are optional and
/// overwrite only what is present.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<PostId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

fn missing_field(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing `{field}` in request body"))
}

fn parse_id(raw: &str) -> Result<PostId> {
    raw.parse()
        .map_err(|e: blog_core::PostIdError| AppError::BadRequest(e.to_string()))
}

/// List every post.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>> {
    let posts = state.store().list().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Fetch a single post by id.
///
/// # Errors
///
/// Returns 400 for a malformed id and 404 if the post doesn't exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>> {
    let id = parse_id(&id)?;
    let post = state
        .store()
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;

    Ok(Json(post.into()))
}

/// Create a post.
///
/// Responds 201 with the stored post and a `Location` header.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(body) = payload?;
    let new = NewPost::try_from(body)?;

    let post = state.store().insert(new).await?;
    tracing::info!(post_id = %post.id, "Created post");

    let location = format!("/posts/{}", post.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PostResponse::from(post)),
    ))
}

/// Update a post in place.
///
/// Responds 204 with no body.
///
/// # Errors
///
/// Returns 400 if the body id is missing or differs from the path id, or if
/// no updatable field is present. Returns 404 if the post doesn't exist.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;

    match body.id {
        Some(body_id) if body_id == id => {}
        Some(body_id) => {
            return Err(AppError::BadRequest(format!(
                "Request path id ({id}) and request body id ({body_id}) must match"
            )));
        }
        None => return Err(missing_field("id")),
    }

    let update = PostUpdate::new(body.title, body.content, body.author)?;
    state.store().update(id, &update).await?;
    tracing::info!(post_id = %id, "Updated post");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a post.
///
/// Responds 204 with no body, or 404 if the post doesn't exist (including a
/// repeated delete).
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    state.store().delete(id).await?;
    tracing::info!(post_id = %id, "Deleted post");

    Ok(StatusCode::NO_CONTENT)
}
