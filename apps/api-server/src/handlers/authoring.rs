//! Authoring and moderation endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use inkwell_core::domain::{NewPost, PostChanges, PostStatus};
use inkwell_shared::ApiResponse;
use inkwell_shared::dto::{
    CreatePostRequest, CreateUserRequest, ModerateCommentRequest, UpdatePostRequest,
};

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn parse_status(raw: &str) -> AppResult<PostStatus> {
    raw.parse()
        .map_err(|e: String| AppError::Validation(vec![format!("status: {e}")]))
}

/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user = state.blog.create_user(body.username, body.email).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(views::user(&user))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let status = match body.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => PostStatus::default(),
    };
    let input = NewPost {
        author_id: body.author_id,
        title: body.title,
        slug: body.slug,
        body: body.body,
        publish: body.publish,
        status,
        tags: body.tags,
    };

    let blog = &state.blog;
    let post = blog.create_post(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(views::post(blog, &post))))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let changes = PostChanges {
        title: body.title,
        slug: body.slug,
        body: body.body,
        publish: body.publish,
        status: body.status.as_deref().map(parse_status).transpose()?,
        tags: body.tags,
    };

    let blog = &state.blog;
    let post = blog.update_post(path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post(blog, &post))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.blog.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/{id}/comments
///
/// Hidden comments included, for moderation.
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.blog.list_comments(path.into_inner()).await?;
    let body: Vec<_> = comments.iter().map(views::comment).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// PATCH /api/comments/{id}
pub async fn moderate_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ModerateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .set_comment_active(path.into_inner(), body.active)
        .await?;
    let message = if comment.active {
        "Comment shown"
    } else {
        "Comment hidden"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(views::comment(&comment), message)))
}
