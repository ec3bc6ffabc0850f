use scraper::{Html, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Raw `href` values of every anchor in `html`, in document order.
/// Anchors without an `href` attribute are skipped.
pub fn extract_links(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_anchors_without_href() {
        let links = extract_links(r#"<a href="1">1</a>  <a href="2">2</a>  <a>3</a>"#);
        assert_eq!(links, vec!["1", "2"]);
    }

    #[test]
    fn test_extract_keeps_document_order_and_duplicates() {
        let html = r#"<html><body>
            <nav><a href="/b">B</a></nav>
            <p><a href="/a">A</a> and again <a href="/b">B</a></p>
        </body></html>"#;
        assert_eq!(extract_links(html), vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_extract_ignores_other_elements() {
        let html = r#"<link href="/style.css"><img src="/logo.png"><area href="/map">"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(extract_links("").is_empty());
        assert!(extract_links("plain text, no markup").is_empty());
    }

    #[test]
    fn test_extract_returns_raw_values() {
        let links = extract_links(r#"<a href="  ../up ">x</a><a href="">empty</a>"#);
        assert_eq!(links, vec!["  ../up ", ""]);
    }
}
