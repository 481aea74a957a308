//! Text helpers for post bodies: Markdown rendering and word truncation.

use pulldown_cmark::{Options, Parser, html};

/// Render Markdown to HTML, then strip anything script-capable.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut unsafe_html = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut unsafe_html, parser);

    ammonia::Builder::default()
        .link_rel(Some("nofollow ugc"))
        .clean(&unsafe_html)
        .to_string()
}

/// Keep the first `max_words` whitespace-separated words, appending an
/// ellipsis when anything was cut.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    let mut truncated = words[..max_words].join(" ");
    truncated.push_str(" …");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_strips_scripts() {
        let html = render_markdown("# Title\n\n**bold** <script>alert(1)</script>");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three", 5), "one two three");
        assert_eq!(truncate_words("one  two\nthree four", 2), "one two …");
    }
}
