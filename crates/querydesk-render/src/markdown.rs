//! Markdown to HTML with raw markup neutralized.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Whether a link or image destination is relative or uses an allowed scheme.
fn is_safe_url(dest: &str) -> bool {
    // Browsers drop whitespace and control characters inside a scheme.
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(i) if cleaned[i..].starts_with(':') => {
            let scheme = cleaned[..i].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn sanitize_tag(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, dest, title) if !is_safe_url(&dest) => {
            Tag::Link(kind, CowStr::Borrowed(""), title)
        }
        Tag::Image(kind, dest, title) if !is_safe_url(&dest) => {
            Tag::Image(kind, CowStr::Borrowed(""), title)
        }
        other => other,
    }
}

/// Render `source` as an HTML fragment. Embedded HTML is emitted as escaped
/// text and link or image targets outside http, https and mailto are blanked,
/// so a reply can never inject script into the page.
pub fn to_safe_html(source: &str) -> String {
    let parser = Parser::new_ext(source, options()).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(tag) => Event::Start(sanitize_tag(tag)),
        Event::End(tag) => Event::End(sanitize_tag(tag)),
        other => other,
    });
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_and_lists() {
        let html = to_safe_html("**3** users\n\n- alice\n- bob\n");
        assert!(html.contains("<strong>3</strong>"));
        assert!(html.contains("<li>alice</li>"));
    }

    #[test]
    fn gfm_extensions() {
        let html = to_safe_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = to_safe_html("hello <script>alert(1)</script>\n\n<div onclick=\"x\">hi</div>\n");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;div onclick="));
    }

    #[test]
    fn script_urls_are_blanked() {
        let html = to_safe_html(
            "[click](javascript:alert(document.cookie)) ![x](javascript:alert(2))\n\n\
             [mixed](JaVaScRiPt:alert(3)) [data](data:text/html;base64,PHNjcmlwdD4=) \
             [spaced](<java script:alert(4)>)\n",
        );
        assert!(!html.to_ascii_lowercase().contains("javascript:"));
        assert!(!html.contains("data:"));
        assert!(html.contains("<a href=\"\">click</a>"));
        assert!(html.contains("<img src=\"\" alt=\"x\""));
    }

    #[test]
    fn web_and_relative_urls_are_kept() {
        let html = to_safe_html(
            "[docs](https://example.com/a?b=1) [mail](mailto:ops@example.com) \
             [rel](reports/q1.html) [anchor](#top) [path](/x:y)\n",
        );
        assert!(html.contains("href=\"https://example.com/a?b=1\""));
        assert!(html.contains("href=\"mailto:ops@example.com\""));
        assert!(html.contains("href=\"reports/q1.html\""));
        assert!(html.contains("href=\"#top\""));
        assert!(html.contains("href=\"/x:y\""));
    }
}
