use actix_web::{App, http::StatusCode, test, web};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use inkwell_core::domain::{NewPost, Post, PostStatus};
use inkwell_core::settings::{BlogSettings, FeedConfig, ListViewConfig, SitemapConfig};

use super::configure_routes;
use crate::state::AppState;

fn settings() -> BlogSettings {
    BlogSettings {
        site_url: "http://blog.test".to_string(),
        mail_from: "admin@myblog.com".to_string(),
        list_view: ListViewConfig {
            template_name: "blog/post/list.html".to_string(),
            context_object_name: "posts".to_string(),
            paginate_by: 2,
        },
        feed: FeedConfig {
            title: "Test blog".to_string(),
            link: "/blog/".to_string(),
            description: "New posts of my blog.".to_string(),
            items: 5,
            description_words: 30,
        },
        sitemap: SitemapConfig {
            changefreq: "weekly".to_string(),
            priority: 0.9,
        },
    }
}

async fn seeded() -> (AppState, Vec<Post>) {
    let state = AppState::in_memory(settings());
    let author = state
        .blog
        .create_user("daniil".into(), "daniil@example.com".into())
        .await
        .unwrap();

    let mut posts = Vec::new();
    for (day, title, body, tags) in [
        (1, "Django Tips", "general web stuff", vec!["python", "django"]),
        (2, "Web Tips", "covers django basics", vec!["python", "web"]),
        (3, "Rust Notes", "ownership & borrowing", vec!["rust"]),
    ] {
        let post = state
            .blog
            .create_post(NewPost {
                author_id: author.id,
                title: title.into(),
                slug: None,
                body: body.into(),
                publish: Some(Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap()),
                status: PostStatus::Published,
                tags: tags.into_iter().map(String::from).collect(),
            })
            .await
            .unwrap();
        posts.push(post);
    }
    (state, posts)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_reports_memory_store() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_list_renders_view_context() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/blog/?page=abc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["template"], "blog/post/list.html");
    assert_eq!(body["posts"]["number"], 1);
    assert_eq!(body["posts"]["num_pages"], 2);
    assert_eq!(body["posts"]["object_list"][0]["title"], "Rust Notes");

    let req = test::TestRequest::get().uri("/blog/?page=9").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["posts"]["number"], 2);
    assert_eq!(body["posts"]["object_list"][0]["title"], "Django Tips");
}

#[actix_web::test]
async fn test_tag_listing() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/blog/tag/python/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["tag"]["slug"], "python");
    assert_eq!(body["posts"]["count"], 2);

    let req = test::TestRequest::get().uri("/blog/tag/cobol/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_detail_and_comment_round_trip() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/blog/2024/6/1/django-tips/comment")
        .set_form([("name", "Ann"), ("email", "ann@example.com"), ("body", "Nice")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get("location").unwrap(),
        "/blog/2024/6/1/django-tips/"
    );

    let req = test::TestRequest::get()
        .uri("/blog/2024/6/1/django-tips/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["post"]["title"], "Django Tips");
    assert_eq!(body["comments"][0]["name"], "Ann");
    assert_eq!(body["comments"][0]["active"], true);
    assert_eq!(body["similar_posts"][0]["title"], "Web Tips");
}

#[actix_web::test]
async fn test_invalid_comment_is_unprocessable() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/blog/2024/6/1/django-tips/comment")
        .set_form([("name", "Ann"), ("email", "not-an-email"), ("body", "Nice")])
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 422);
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[actix_web::test]
async fn test_search_modes_and_bad_queries() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/blog/search?query=django&prioritize_title=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["results"][0]["post"]["title"], "Django Tips");
    assert_eq!(body["results"][1]["post"]["title"], "Web Tips");

    for uri in ["/blog/search", "/blog/search?query=%20%20"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn test_most_commented_rejects_zero_count() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/blog/most-commented?count=0")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/blog/most-commented?count=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::get().uri("/blog/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total_posts"], 3);
}

#[actix_web::test]
async fn test_share_post() {
    let (state, posts) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/blog/{}/share/", posts[0].id))
        .set_form([
            ("name", "Dan"),
            ("email", "dan@example.com"),
            ("to", "friend@example.com"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["sent"], true);
    assert_eq!(body["to"], "friend@example.com");
}

#[actix_web::test]
async fn test_authoring_flow() {
    let (state, posts) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "author_id": posts[0].author_id,
            "title": "Django Tips",
            "publish": "2024-06-01T20:00:00Z",
            "status": "published",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", posts[2].id))
        .set_json(json!({ "status": "draft" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "draft");

    let req = test::TestRequest::get()
        .uri("/blog/2024/6/3/rust-notes/")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", posts[2].id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_moderation_hides_comment() {
    let (state, posts) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/blog/2024/6/1/django-tips/comment")
        .set_form([("name", "Ann"), ("email", "ann@example.com"), ("body", "Nice")])
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}/comments", posts[0].id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let comment_id = body["data"][0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/comments/{comment_id}"))
        .set_json(json!({ "active": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["active"], false);

    let req = test::TestRequest::get()
        .uri("/blog/2024/6/1/django-tips/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_feed_and_sitemap() {
    let (state, _) = seeded().await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/blog/feed/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let xml = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(xml.contains("<title>Rust Notes</title>"));
    assert!(xml.contains("ownership &amp; borrowing"));

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let res = test::call_service(&app, req).await;
    let xml = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert_eq!(xml.matches("<url>").count(), 3);
    assert!(xml.contains("<loc>http://blog.test/blog/2024/6/2/web-tips/</loc>"));
}
