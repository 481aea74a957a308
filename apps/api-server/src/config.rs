//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use inkwell_core::settings::{BlogSettings, FeedConfig, ListViewConfig, SitemapConfig};
use inkwell_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub blog: BlogSettings,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parsed("DB_CONNECT_TIMEOUT_SECS", 8)),
            sqlx_logging: flag("DB_LOG_STATEMENTS", false),
        });

        let port = parsed("PORT", 8080);
        let site_url = env::var("SITE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            database,
            run_migrations: flag("RUN_MIGRATIONS", false),
            blog: BlogSettings {
                site_url,
                mail_from: text("MAIL_FROM", "admin@myblog.com"),
                list_view: ListViewConfig {
                    template_name: "blog/post/list.html".to_string(),
                    context_object_name: "posts".to_string(),
                    paginate_by: parsed("BLOG_PAGE_SIZE", 3u64).max(1),
                },
                feed: FeedConfig {
                    title: text("FEED_TITLE", "My blog"),
                    link: "/blog/".to_string(),
                    description: text("FEED_DESCRIPTION", "New posts of my blog."),
                    items: 5,
                    description_words: 30,
                },
                sitemap: SitemapConfig {
                    changefreq: "weekly".to_string(),
                    priority: 0.9,
                },
            },
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn text(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}
