//! Domain values rendered into API payloads.

use inkwell_core::BlogService;
use inkwell_core::domain::{Comment, Post, Tag, User};
use inkwell_core::markup::render_markdown;
use inkwell_core::pagination::Page;
use inkwell_core::ranking::ScoredPost;
use inkwell_shared::dto::{
    CommentResponse, PageResponse, PostResponse, SearchResultResponse, TagResponse, UserResponse,
};

pub fn tag(tag: &Tag) -> TagResponse {
    TagResponse {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
    }
}

pub fn post(blog: &BlogService, post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        author_id: post.author_id,
        body: post.body.clone(),
        body_html: render_markdown(&post.body),
        publish: post.publish,
        created: post.created,
        updated: post.updated,
        status: post.status.to_string(),
        tags: post.tags.iter().map(tag).collect(),
        url: blog.post_url(post),
    }
}

pub fn posts(blog: &BlogService, items: &[Post]) -> Vec<PostResponse> {
    items.iter().map(|p| post(blog, p)).collect()
}

pub fn comment(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        name: comment.name.clone(),
        body: comment.body.clone(),
        created: comment.created,
        active: comment.active,
    }
}

pub fn scored(blog: &BlogService, hit: &ScoredPost) -> SearchResultResponse {
    SearchResultResponse {
        post: post(blog, &hit.post),
        rank: hit.rank,
    }
}

pub fn page(blog: &BlogService, page: Page<Post>) -> PageResponse<PostResponse> {
    PageResponse {
        object_list: posts(blog, &page.items),
        number: page.number,
        num_pages: page.num_pages,
        count: page.total,
        has_previous: page.has_previous,
        has_next: page.has_next,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: user.created_at,
    }
}
