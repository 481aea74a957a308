//! Reader-facing blog pages: listings, detail, comments, sharing, search
//! and the ranked sidebars.

use actix_web::{HttpResponse, http::header, web};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use inkwell_core::domain::{NewComment, ShareRequest};
use inkwell_core::service::{DEFAULT_LATEST_POSTS, DEFAULT_MOST_COMMENTED};
use inkwell_shared::dto::{
    CommentForm, CountParams, PageParams, PostDetailResponse, SearchParams, SearchResponse,
    ShareForm, ShareResponse, StatsResponse,
};

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DETAIL_TEMPLATE: &str = "blog/post/detail.html";

type DatePath = web::Path<(i32, u32, u32, String)>;

/// GET /blog/
pub async fn post_list(
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    listing(&state, None, params.page.as_deref()).await
}

/// GET /blog/tag/{tag_slug}/
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    listing(&state, Some(path.as_str()), params.page.as_deref()).await
}

async fn listing(
    state: &AppState,
    tag_slug: Option<&str>,
    raw_page: Option<&str>,
) -> AppResult<HttpResponse> {
    let blog = &state.blog;
    let listing = blog.list_posts(tag_slug, raw_page).await?;
    let view = &blog.settings().list_view;

    let mut context = Map::new();
    context.insert("template".into(), json!(view.template_name));
    context.insert(
        "tag".into(),
        listing.tag.as_ref().map_or(Value::Null, |t| json!(views::tag(t))),
    );
    context.insert(
        view.context_object_name.clone(),
        json!(views::page(blog, listing.page)),
    );

    Ok(HttpResponse::Ok().json(Value::Object(context)))
}

/// GET /blog/{year}/{month}/{day}/{slug}/
pub async fn post_detail(state: web::Data<AppState>, path: DatePath) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let blog = &state.blog;
    let detail = blog.post_detail(year, month, day, &slug).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        template: DETAIL_TEMPLATE.to_string(),
        post: views::post(blog, &detail.post),
        comments: detail.comments.iter().map(views::comment).collect(),
        similar_posts: views::posts(blog, &detail.similar_posts),
    }))
}

/// POST /blog/{year}/{month}/{day}/{slug}/comment
///
/// Redirects back to the post once the comment is stored.
pub async fn add_comment(
    state: web::Data<AppState>,
    path: DatePath,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let form = form.into_inner();
    let comment = NewComment {
        name: form.name,
        email: form.email,
        body: form.body,
    };
    state
        .blog
        .add_comment(year, month, day, &slug, comment)
        .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/blog/{year}/{month}/{day}/{slug}/")))
        .finish())
}

/// POST /blog/{post_id}/share/
pub async fn share_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<ShareForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let request = ShareRequest {
        name: form.name,
        email: form.email,
        to: form.to,
        comments: form.comments,
    };
    let mail = state.blog.share_post(path.into_inner(), request).await?;

    Ok(HttpResponse::Ok().json(ShareResponse {
        sent: true,
        to: mail.to.join(", "),
    }))
}

/// GET /blog/search?query=&prioritize_title=
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = params
        .query
        .ok_or_else(|| AppError::BadRequest("missing 'query' parameter".to_string()))?;
    let blog = &state.blog;
    let hits = blog.search(&query, params.prioritize_title).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        query,
        prioritize_title: params.prioritize_title,
        results: hits.iter().map(|h| views::scored(blog, h)).collect(),
    }))
}

/// GET /blog/most-commented?count=
pub async fn most_commented(
    state: web::Data<AppState>,
    params: web::Query<CountParams>,
) -> AppResult<HttpResponse> {
    let blog = &state.blog;
    let posts = blog
        .most_commented(params.count.unwrap_or(DEFAULT_MOST_COMMENTED))
        .await?;
    Ok(HttpResponse::Ok().json(views::posts(blog, &posts)))
}

/// GET /blog/latest?count=
pub async fn latest_posts(
    state: web::Data<AppState>,
    params: web::Query<CountParams>,
) -> AppResult<HttpResponse> {
    let blog = &state.blog;
    let posts = blog
        .latest_posts(params.count.unwrap_or(DEFAULT_LATEST_POSTS))
        .await?;
    Ok(HttpResponse::Ok().json(views::posts(blog, &posts)))
}

/// GET /blog/stats
pub async fn stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let total_posts = state.blog.total_posts().await?;
    Ok(HttpResponse::Ok().json(StatsResponse { total_posts }))
}
