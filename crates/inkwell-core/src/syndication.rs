//! Feed and sitemap entries. Serialization to XML lives with the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Post;
use crate::markup::truncate_words;
use crate::settings::{BlogSettings, FeedConfig};

/// One item of the latest-posts feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    pub guid: String,
}

impl FeedItem {
    pub fn from_post(post: &Post, settings: &BlogSettings) -> Self {
        let link = settings.absolute_url(&post.absolute_path());
        Self {
            title: post.title.clone(),
            description: truncate_words(&post.body, settings.feed.description_words),
            pub_date: post.publish,
            guid: link.clone(),
            link,
        }
    }
}

/// A feed channel ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FeedItem>,
}

impl Feed {
    pub fn new(config: &FeedConfig, settings: &BlogSettings, items: Vec<FeedItem>) -> Self {
        Self {
            title: config.title.clone(),
            link: settings.absolute_url(&config.link),
            description: config.description.clone(),
            items,
        }
    }
}

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: String,
    pub priority: f32,
}

impl SitemapEntry {
    pub fn from_post(post: &Post, settings: &BlogSettings) -> Self {
        Self {
            loc: settings.absolute_url(&post.absolute_path()),
            lastmod: post.updated,
            changefreq: settings.sitemap.changefreq.clone(),
            priority: settings.sitemap.priority,
        }
    }
}
