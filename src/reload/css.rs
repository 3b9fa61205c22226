//! Stylesheet cache busting.

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

use super::page::{LinkElement, Page};

/// Query parameter appended to stylesheet URLs.
pub const CACHE_PARAM: &str = "_cacheOverride";

static CACHE_OVERRIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[&?]_cacheOverride=\d+").unwrap());

/// Milliseconds since the Unix epoch.
pub fn epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Replace the first `_cacheOverride=<digits>` parameter of `href` with a
/// fresh one carrying `stamp`.
pub fn bust_cache(href: &str, stamp: u128) -> String {
    let url = CACHE_OVERRIDE.replace(href, "");
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{CACHE_PARAM}={stamp}")
}

/// `rel` absent, empty, or `stylesheet` in any case.
pub fn is_stylesheet(rel: Option<&str>) -> bool {
    match rel {
        None => true,
        Some(rel) => rel.is_empty() || rel.eq_ignore_ascii_case("stylesheet"),
    }
}

/// Rewrite `link` in place when it is a stylesheet with an href.
/// Returns whether it was rewritten.
pub fn refresh_link(link: &mut LinkElement, stamp: u128) -> bool {
    if !is_stylesheet(link.rel.as_deref()) {
        return false;
    }
    match link.href.as_mut() {
        Some(href) => {
            *href = bust_cache(href, stamp);
            true
        }
        // A stylesheet without an href attribute is left as is
        None => false,
    }
}

/// Hide the body, then detach, rewrite and reattach every `<link>` in
/// document order. Returns how many hrefs were rewritten.
///
/// Restoring visibility is left to the caller.
pub fn refresh_stylesheets(page: &dyn Page, stamp: u128) -> usize {
    page.set_body_visible(false);

    let mut rewritten = 0;
    for mut link in page.take_links() {
        if refresh_link(&mut link, stamp) {
            rewritten += 1;
        }
        page.append_link(link);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::page::HeadlessPage;

    #[test]
    fn test_bust_cache_appends() {
        assert_eq!(bust_cache("a.css", 7), "a.css?_cacheOverride=7");
        assert_eq!(bust_cache("a.css?v=1", 7), "a.css?v=1&_cacheOverride=7");
    }

    #[test]
    fn test_bust_cache_replaces_existing() {
        assert_eq!(bust_cache("a.css?_cacheOverride=123", 9), "a.css?_cacheOverride=9");
        assert_eq!(
            bust_cache("a.css?v=1&_cacheOverride=123", 9),
            "a.css?v=1&_cacheOverride=9"
        );
        // Only the first occurrence is dropped
        assert_eq!(
            bust_cache("a.css?_cacheOverride=1&_cacheOverride=2", 9),
            "a.css&_cacheOverride=2?_cacheOverride=9"
        );
    }

    #[test]
    fn test_is_stylesheet() {
        assert!(is_stylesheet(None));
        assert!(is_stylesheet(Some("")));
        assert!(is_stylesheet(Some("StyleSheet")));
        assert!(!is_stylesheet(Some("icon")));
        assert!(!is_stylesheet(Some("preload")));
    }

    #[test]
    fn test_refresh_keeps_order_and_skips_others() {
        let page = HeadlessPage::with_links(
            false,
            vec![
                LinkElement::stylesheet("main.css"),
                LinkElement::new(Some("icon"), Some("favicon.ico")),
                LinkElement::new(None, None),
                LinkElement::new(Some(""), Some("theme.css?v=2")),
            ],
        );

        assert_eq!(refresh_stylesheets(&page, 42), 2);
        assert!(!page.body_visible());

        let hrefs: Vec<_> = page.links().into_iter().map(|l| l.href).collect();
        assert_eq!(
            hrefs,
            [
                Some("main.css?_cacheOverride=42".to_string()),
                Some("favicon.ico".to_string()),
                None,
                Some("theme.css?v=2&_cacheOverride=42".to_string()),
            ]
        );
    }

    #[test]
    fn test_refresh_twice_keeps_one_param() {
        let page = HeadlessPage::with_links(false, vec![LinkElement::stylesheet("main.css")]);
        refresh_stylesheets(&page, 1);
        refresh_stylesheets(&page, 2);
        assert_eq!(page.links()[0].href.as_deref(), Some("main.css?_cacheOverride=2"));
    }
}
