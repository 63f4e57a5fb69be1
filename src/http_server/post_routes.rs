//! Post HTTP Routes
//!
//! `/hoots` collection with nested comments. Every route takes a
//! [`Caller`], so all of them require a valid bearer token.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::auth::{Caller, InMemoryUserRepository, JwtManager, TokenVerifier};
use crate::posts::{
    CommentBody, CommentView, InMemoryPostStore, NewPost, PostError, PostPatch, PostService,
    PostView,
};

use super::response::MessageResponse;

/// Shared post state
pub struct PostsState {
    pub service: PostService<InMemoryPostStore, InMemoryUserRepository>,
    pub jwt: JwtManager,
}

impl PostsState {
    pub fn new(
        service: PostService<InMemoryPostStore, InMemoryUserRepository>,
        jwt: JwtManager,
    ) -> Self {
        Self { service, jwt }
    }
}

impl TokenVerifier for PostsState {
    fn token_verifier(&self) -> &JwtManager {
        &self.jwt
    }
}

/// Post routes with shared state
pub fn post_routes(state: Arc<PostsState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:hoot_id",
            get(show_handler).put(update_handler).delete(delete_handler),
        )
        .route("/:hoot_id/comments", post(create_comment_handler))
        .route(
            "/:hoot_id/comments/:comment_id",
            put(update_comment_handler).delete(delete_comment_handler),
        )
        .with_state(state)
}

// ==================
// Post Handlers
// ==================

/// POST /hoots
async fn create_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Json(payload): Json<NewPost>,
) -> Result<(StatusCode, Json<PostView>), PostError> {
    let post = state.service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /hoots
async fn list_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
) -> Result<Json<Vec<PostView>>, PostError> {
    Ok(Json(state.service.list(&caller).await?))
}

/// GET /hoots/:hoot_id
async fn show_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path(hoot_id): Path<String>,
) -> Result<Json<PostView>, PostError> {
    Ok(Json(state.service.get(&caller, &hoot_id).await?))
}

/// PUT /hoots/:hoot_id
async fn update_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path(hoot_id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<PostView>, PostError> {
    Ok(Json(state.service.update(&caller, &hoot_id, patch).await?))
}

/// DELETE /hoots/:hoot_id
async fn delete_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path(hoot_id): Path<String>,
) -> Result<Json<PostView>, PostError> {
    Ok(Json(state.service.delete(&caller, &hoot_id).await?))
}

// ==================
// Comment Handlers
// ==================

/// POST /hoots/:hoot_id/comments
async fn create_comment_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path(hoot_id): Path<String>,
    Json(body): Json<CommentBody>,
) -> Result<(StatusCode, Json<CommentView>), PostError> {
    let comment = state.service.add_comment(&caller, &hoot_id, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// PUT /hoots/:hoot_id/comments/:comment_id
async fn update_comment_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path((hoot_id, comment_id)): Path<(String, String)>,
    Json(body): Json<CommentBody>,
) -> Result<Json<MessageResponse>, PostError> {
    state
        .service
        .update_comment(&caller, &hoot_id, &comment_id, body)
        .await?;
    Ok(Json(MessageResponse::ok()))
}

/// DELETE /hoots/:hoot_id/comments/:comment_id
async fn delete_comment_handler(
    State(state): State<Arc<PostsState>>,
    caller: Caller,
    Path((hoot_id, comment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, PostError> {
    state
        .service
        .delete_comment(&caller, &hoot_id, &comment_id)
        .await?;
    Ok(Json(MessageResponse::ok()))
}
