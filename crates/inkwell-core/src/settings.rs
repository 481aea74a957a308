//! Explicit blog settings. Nothing here has an implicit default; the
//! application assembles every field at startup.

use serde::{Deserialize, Serialize};

/// How a post listing is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListViewConfig {
    /// Template the presentation layer renders the listing with.
    pub template_name: String,
    /// Key under which the page of posts is exposed to the template.
    pub context_object_name: String,
    /// Posts per page.
    pub paginate_by: u64,
}

/// Channel metadata of the RSS feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub title: String,
    /// Site-relative link of the channel, e.g. `/blog/`.
    pub link: String,
    pub description: String,
    /// Number of latest posts in the feed.
    pub items: usize,
    /// Words of the body kept in each item description.
    pub description_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapConfig {
    pub changefreq: String,
    pub priority: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogSettings {
    /// Scheme and host used to build absolute links, without trailing slash.
    pub site_url: String,
    /// Sender address of share mails.
    pub mail_from: String,
    pub list_view: ListViewConfig,
    pub feed: FeedConfig,
    pub sitemap: SitemapConfig,
}

impl BlogSettings {
    /// Absolute URL of a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
