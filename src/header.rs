//! Template doc-header extraction.
//!
//! Every snippet template opens with a comment block carrying its metadata,
//! in the conventional file-header style: one `Key: value` per line, value
//! running to end of line. The surrounding comment syntax is irrelevant —
//! `<?php /* ... */ ?>`, `<!-- ... -->`, and bare `/* ... */` all work,
//! because extraction matches keys line-by-line and tolerates leading
//! comment punctuation:
//!
//! ```text
//! <?php
//! /*
//! Title: Quote
//! Shortcode: [quote author=""][/quote]
//! Styleguide: [quote author="copy-3"]copy-10[/quote]
//! Instructions: Use for pull quotes.
//! */
//! ?>
//! <blockquote>...</blockquote>
//! ```
//!
//! Recognized keys: `Title`, `Shortcode`, `HTML`, `Styleguide`,
//! `Styleguide_2` .. `Styleguide_5`, `Instructions`. Every field is
//! optional; a missing key is simply an empty value.
//!
//! Only the first 8KB of a file are searched, so a template cannot pay a
//! read cost proportional to its body size.

use regex::Regex;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Header search window, matching the conventional file-header limit.
const HEADER_READ_LIMIT: u64 = 8 * 1024;

/// How many styleguide preview override slots a template may declare.
pub const PREVIEW_SLOTS: usize = 5;

/// Parsed doc-header fields. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetHeader {
    pub title: String,
    pub shortcode: String,
    pub html: String,
    /// `Styleguide` .. `Styleguide_5`, trailing empty slots trimmed.
    pub previews: Vec<String>,
    pub instructions: String,
}

/// Read and parse the doc header from a template file.
pub fn read_header(path: &Path) -> io::Result<SnippetHeader> {
    let mut window = Vec::new();
    File::open(path)?
        .take(HEADER_READ_LIMIT)
        .read_to_end(&mut window)?;
    // Lossy: the window may cut a multibyte sequence at the 8KB boundary.
    Ok(parse_header(&String::from_utf8_lossy(&window)))
}

/// Parse doc-header fields from raw template source.
pub fn parse_header(source: &str) -> SnippetHeader {
    let mut previews: Vec<String> = (1..=PREVIEW_SLOTS)
        .map(|slot| {
            let key = if slot == 1 {
                "Styleguide".to_string()
            } else {
                format!("Styleguide_{slot}")
            };
            extract_field(source, &key)
        })
        .collect();
    while previews.last().is_some_and(String::is_empty) {
        previews.pop();
    }

    SnippetHeader {
        title: extract_field(source, "Title"),
        shortcode: extract_field(source, "Shortcode"),
        html: extract_field(source, "HTML"),
        previews,
        instructions: extract_field(source, "Instructions"),
    }
}

/// Extract one `Key: value` field from header text.
///
/// Matches at line start after any comment punctuation, case-insensitive,
/// value to end of line with a trailing comment close stripped.
pub fn extract_field(source: &str, key: &str) -> String {
    let pattern = format!(r"(?mi)^[ \t/*#@<!-]*{}:(.*)$", regex::escape(key));
    let re = Regex::new(&pattern).unwrap();
    re.captures(source)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .trim()
                .trim_end_matches("*/")
                .trim_end_matches("-->")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// The renderable body of a template: everything after the leading header
/// comment block. Sources without a recognized leading block render whole.
pub fn body(source: &str) -> &str {
    let trimmed = source.trim_start();
    for (open, close) in [("<?php", "?>"), ("<!--", "-->"), ("/*", "*/")] {
        if trimmed.starts_with(open) {
            if let Some(end) = trimmed.find(close) {
                return trimmed[end + close.len()..].trim_start();
            }
            // Unterminated header block: nothing renderable follows.
            return "";
        }
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PHP_TEMPLATE: &str = r#"<?php
/*
Title: Quote
Shortcode: [quote author=""][/quote]
Styleguide: [quote author="copy-3"]copy-10[/quote]
Styleguide_2: [quote]copy-20[/quote]
Instructions: Use for pull quotes.
*/
?>
<blockquote class="quote">
    <p>{{content}}</p>
    <cite>{{author}}</cite>
</blockquote>
"#;

    #[test]
    fn parses_all_fields_from_php_comment() {
        let header = parse_header(PHP_TEMPLATE);
        assert_eq!(header.title, "Quote");
        assert_eq!(header.shortcode, "[quote author=\"\"][/quote]");
        assert_eq!(header.previews.len(), 2);
        assert_eq!(header.previews[0], "[quote author=\"copy-3\"]copy-10[/quote]");
        assert_eq!(header.instructions, "Use for pull quotes.");
        assert!(header.html.is_empty());
    }

    #[test]
    fn parses_html_comment_header() {
        let source = "<!--\nTitle: Divider\nHTML: <hr class=\"fancy\" />\n-->\n<hr class=\"fancy\" />\n";
        let header = parse_header(source);
        assert_eq!(header.title, "Divider");
        assert_eq!(header.html, "<hr class=\"fancy\" />");
        assert!(header.shortcode.is_empty());
    }

    #[test]
    fn parses_star_prefixed_lines() {
        let source = "/*\n * Title: Button\n * Shortcode: [button][/button]\n */\n";
        let header = parse_header(source);
        assert_eq!(header.title, "Button");
        assert_eq!(header.shortcode, "[button][/button]");
    }

    #[test]
    fn keys_are_case_insensitive() {
        assert_eq!(extract_field("title: Lower", "Title"), "Lower");
    }

    #[test]
    fn missing_fields_are_empty() {
        let header = parse_header("<?php /* Title: Only */ ?>\nbody\n");
        assert!(header.shortcode.is_empty());
        assert!(header.previews.is_empty());
        assert!(header.instructions.is_empty());
    }

    #[test]
    fn single_line_comment_close_is_stripped() {
        assert_eq!(
            extract_field("/* Title: Inline */", "Title"),
            "Inline"
        );
        assert_eq!(
            extract_field("<!-- Title: Inline -->", "Title"),
            "Inline"
        );
    }

    #[test]
    fn preview_gap_keeps_slot_positions() {
        let source = "/*\nTitle: X\nStyleguide_3: third\n*/";
        let header = parse_header(source);
        assert_eq!(header.previews.len(), 3);
        assert!(header.previews[0].is_empty());
        assert!(header.previews[1].is_empty());
        assert_eq!(header.previews[2], "third");
    }

    #[test]
    fn hidden_sentinel_survives_extraction() {
        let header = parse_header("/*\nTitle: Internal\nStyleguide: hidden\n*/");
        assert_eq!(header.previews[0], "hidden");
    }

    #[test]
    fn body_skips_php_header_block() {
        let body = body(PHP_TEMPLATE);
        assert!(body.starts_with("<blockquote"));
        assert!(!body.contains("Title:"));
    }

    #[test]
    fn body_skips_html_comment_block() {
        let source = "<!--\nTitle: Divider\n-->\n<hr />\n";
        assert_eq!(body(source), "<hr />\n");
    }

    #[test]
    fn body_of_headerless_source_is_whole() {
        assert_eq!(body("<p>raw</p>"), "<p>raw</p>");
    }

    #[test]
    fn body_of_unterminated_header_is_empty() {
        assert_eq!(body("<?php /* Title: Broken"), "");
    }

    #[test]
    fn read_header_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quote.php");
        fs::write(&path, PHP_TEMPLATE).unwrap();

        let header = read_header(&path).unwrap();
        assert_eq!(header.title, "Quote");
    }

    #[test]
    fn header_beyond_window_is_ignored() {
        let mut source = String::from("<?php\n/*\nTitle: Early\n*/\n?>\n");
        source.push_str(&"x".repeat(9 * 1024));
        source.push_str("\n<?php /* Shortcode: [late][/late] */ ?>\n");

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.php");
        fs::write(&path, &source).unwrap();

        let header = read_header(&path).unwrap();
        assert_eq!(header.title, "Early");
        assert!(header.shortcode.is_empty());
    }
}
