//! HTTP handlers and route configuration.

mod authoring;
mod blog;
mod health;
mod syndication;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sitemap.xml", web::get().to(syndication::sitemap))
        .service(
            web::scope("/blog")
                .route("/", web::get().to(blog::post_list))
                .route("/tag/{tag_slug}/", web::get().to(blog::post_list_by_tag))
                .route("/search", web::get().to(blog::search))
                .route("/most-commented", web::get().to(blog::most_commented))
                .route("/latest", web::get().to(blog::latest_posts))
                .route("/stats", web::get().to(blog::stats))
                .route("/feed/", web::get().to(syndication::feed))
                .route("/{post_id}/share/", web::post().to(blog::share_post))
                .route(
                    "/{year}/{month}/{day}/{slug}/",
                    web::get().to(blog::post_detail),
                )
                .route(
                    "/{year}/{month}/{day}/{slug}/comment",
                    web::post().to(blog::add_comment),
                ),
        )
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Authoring
                .route("/users", web::post().to(authoring::create_user))
                .route("/posts", web::post().to(authoring::create_post))
                .route("/posts/{id}", web::put().to(authoring::update_post))
                .route("/posts/{id}", web::delete().to(authoring::delete_post))
                .route("/posts/{id}/comments", web::get().to(authoring::list_comments))
                // Moderation
                .route("/comments/{id}", web::patch().to(authoring::moderate_comment)),
        );
}
