//! Posts API handlers: creation, feed reads, likes, and comments.
//!
//! ```text
//! POST  /api/v1/posts
//! GET   /api/v1/posts
//! GET   /api/v1/posts/user/{userId}
//! PATCH /api/v1/posts/{id}/like
//! POST  /api/v1/posts/{id}/comments
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Post, PostId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Post creation request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub description: String,
    #[serde(default)]
    pub picture_ref: Option<String>,
}

/// Comment request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub text: String,
}

/// Create a post authored by the session user.
///
/// Returns the whole feed after insertion, matching the feed contract of
/// "every post, oldest first".
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Feed including the new post", body = [Post]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown author", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let payload = payload.into_inner();
    let feed = state
        .feed
        .create_post(&author, payload.description, payload.picture_ref)
        .await?;
    Ok(HttpResponse::Created().json(feed))
}

/// Fetch the whole feed.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Every post, oldest first", body = [Post]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getFeed"
)]
#[get("/posts")]
pub async fn get_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    let feed = state.feed.feed().await?;
    Ok(web::Json(feed))
}

/// Fetch every post authored by one user.
#[utoipa::path(
    get,
    path = "/api/v1/posts/user/{userId}",
    params(("userId" = UserId, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author's posts, oldest first", body = [Post]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getUserPosts"
)]
#[get("/posts/user/{user_id}")]
pub async fn get_user_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<UserId>,
) -> ApiResult<web::Json<Vec<Post>>> {
    session.require_user_id()?;
    let posts = state.feed.user_posts(&path).await?;
    Ok(web::Json(posts))
}

/// Toggle the session user's like on a post.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/like",
    params(("id" = PostId, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown post", body = Error),
        (status = 409, description = "Concurrent update", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "togglePostLike"
)]
#[patch("/posts/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<PostId>,
) -> ApiResult<web::Json<Post>> {
    let user = session.require_user_id()?;
    let post = state.feed.toggle_like(&path, &user).await?;
    Ok(web::Json(post))
}

/// Append a comment to a post.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = PostId, Path, description = "Post id")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 400, description = "Blank comment", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown post", body = Error),
        (status = 409, description = "Concurrent update", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "addPostComment"
)]
#[post("/posts/{id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<PostId>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<Post>> {
    let user = session.require_user_id()?;
    let post = state.feed.add_comment(&path, &user, &payload.text).await?;
    Ok(web::Json(post))
}
