//! Attribute URL normalization.
//!
//! Call-site attribute values often arrive as pasted rich-text: a whole
//! anchor element, a whole image element, or a bare URL. Each is reduced to
//! an absolute, environment-correct URL before template substitution:
//!
//! - an anchor element yields its `href`, an image element its `src`
//! - `www.`-prefixed candidates gain `http://`
//! - `wp-content/...` asset paths (with or without a leading slash) are
//!   rewritten onto the configured base URL
//! - anything else passes through unchanged; empty input yields empty output

use regex::Regex;
use std::sync::LazyLock;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<a.*</a>\s*$").unwrap());
static HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"href="(.*?)""#).unwrap());
static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<img.*(/>|>)\s*$").unwrap());
static SRC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"src="(.*?)""#).unwrap());
static WWW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^www\.").unwrap());
static ASSET_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?wp-content/(.*?)$").unwrap());

/// Normalize one attribute value to an absolute URL where it looks like a
/// link, an image, or a bare URL/asset path. Non-URL text passes through.
pub fn normalize(value: &str, base_url: &str) -> String {
    if ANCHOR.is_match(value) {
        if let Some(captures) = HREF.captures(value) {
            return absolute(&captures[1], base_url);
        }
    }
    if IMG.is_match(value) {
        if let Some(captures) = SRC.captures(value) {
            return absolute(&captures[1], base_url);
        }
    }
    if value.is_empty() {
        return String::new();
    }
    absolute(value, base_url)
}

/// Apply the scheme/base rewrites to a candidate URL string.
fn absolute(candidate: &str, base_url: &str) -> String {
    if WWW.is_match(candidate) {
        return format!("http://{candidate}");
    }
    if let Some(captures) = ASSET_PATH.captures(candidate) {
        return format!("{}/wp-content/{}", base_url, &captures[1]);
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://site.test";

    #[test]
    fn www_gets_http_scheme() {
        assert_eq!(normalize("www.example.com", BASE), "http://www.example.com");
    }

    #[test]
    fn asset_path_rewritten_onto_base() {
        assert_eq!(
            normalize("/wp-content/img.png", BASE),
            "https://site.test/wp-content/img.png"
        );
    }

    #[test]
    fn asset_path_without_leading_slash() {
        assert_eq!(
            normalize("wp-content/uploads/a.jpg", BASE),
            "https://site.test/wp-content/uploads/a.jpg"
        );
    }

    #[test]
    fn anchor_element_yields_href() {
        assert_eq!(
            normalize(r#"<a href="/wp-content/doc.pdf">Download</a>"#, BASE),
            "https://site.test/wp-content/doc.pdf"
        );
    }

    #[test]
    fn anchor_with_surrounding_whitespace() {
        assert_eq!(
            normalize("  <a href=\"www.example.com\">x</a>  ", BASE),
            "http://www.example.com"
        );
    }

    #[test]
    fn image_element_yields_src() {
        assert_eq!(
            normalize(r#"<img src="wp-content/uploads/hero.jpg" alt="" />"#, BASE),
            "https://site.test/wp-content/uploads/hero.jpg"
        );
    }

    #[test]
    fn image_without_self_close() {
        assert_eq!(
            normalize(r#"<img src="https://cdn.test/a.png">"#, BASE),
            "https://cdn.test/a.png"
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        assert_eq!(
            normalize("https://example.com/page", BASE),
            "https://example.com/page"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize("Jane Doe", BASE), "Jane Doe");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize("", BASE), "");
    }
}
