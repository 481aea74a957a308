//! RSS feed and sitemap.

use actix_web::{HttpResponse, web};
use html_escape::encode_text;

use inkwell_core::syndication::{Feed, SitemapEntry};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /blog/feed/
pub async fn feed(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let feed = state.blog.feed().await?;
    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(render_rss(&feed)))
}

/// GET /sitemap.xml
pub async fn sitemap(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let entries = state.blog.sitemap_entries().await?;
    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(render_sitemap(&entries)))
}

pub fn render_rss(feed: &Feed) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<rss version=\"2.0\"><channel>");
    xml.push_str(&format!(
        "<title>{}</title><link>{}</link><description>{}</description>",
        encode_text(&feed.title),
        encode_text(&feed.link),
        encode_text(&feed.description),
    ));
    if let Some(newest) = feed.items.first() {
        xml.push_str(&format!(
            "<lastBuildDate>{}</lastBuildDate>",
            newest.pub_date.to_rfc2822()
        ));
    }
    for item in &feed.items {
        xml.push_str(&format!(
            "<item><title>{}</title><link>{}</link><description>{}</description>\
             <pubDate>{}</pubDate><guid>{}</guid></item>",
            encode_text(&item.title),
            encode_text(&item.link),
            encode_text(&item.description),
            item.pub_date.to_rfc2822(),
            encode_text(&item.guid),
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">");
    for entry in entries {
        xml.push_str(&format!(
            "<url><loc>{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq>\
             <priority>{:.1}</priority></url>",
            encode_text(&entry.loc),
            entry.lastmod.format("%Y-%m-%d"),
            encode_text(&entry.changefreq),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use inkwell_core::syndication::FeedItem;

    #[test]
    fn test_rss_escapes_markup() {
        let feed = Feed {
            title: "Tips & Tricks".into(),
            link: "http://blog.test/blog/".into(),
            description: "New posts".into(),
            items: vec![FeedItem {
                title: "<b>Bold</b>".into(),
                link: "http://blog.test/blog/2024/6/1/bold/".into(),
                description: "a < b".into(),
                pub_date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
                guid: "http://blog.test/blog/2024/6/1/bold/".into(),
            }],
        };
        let xml = render_rss(&feed);
        assert!(xml.contains("<title>Tips &amp; Tricks</title>"));
        assert!(xml.contains("<title>&lt;b&gt;Bold&lt;/b&gt;</title>"));
        assert!(xml.contains("<pubDate>Sat, 1 Jun 2024 09:00:00 +0000</pubDate>"));
        assert!(xml.contains("<lastBuildDate>Sat, 1 Jun 2024 09:00:00 +0000</lastBuildDate>"));
        assert!(xml.ends_with("</item></channel></rss>"));
    }

    #[test]
    fn test_empty_feed_has_no_build_date() {
        let feed = Feed {
            title: "Empty".into(),
            link: "http://blog.test/blog/".into(),
            description: "Nothing yet".into(),
            items: Vec::new(),
        };
        let xml = render_rss(&feed);
        assert!(!xml.contains("lastBuildDate"));
        assert!(xml.ends_with("<description>Nothing yet</description></channel></rss>"));
    }

    #[test]
    fn test_sitemap_entry() {
        let entries = vec![SitemapEntry {
            loc: "http://blog.test/blog/2024/6/1/bold/".into(),
            lastmod: Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
            changefreq: "weekly".into(),
            priority: 0.9,
        }];
        let xml = render_sitemap(&entries);
        assert!(xml.contains("<lastmod>2024-06-02</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq><priority>0.9</priority>"));
    }
}
