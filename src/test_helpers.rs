//! Shared test utilities for the snipguide test suite.
//!
//! Provides a programmatic template fixture builder and manifest lookup
//! helpers that panic with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_templates();
//! let manifest = scan::scan(&tmp.path().join("snippet-templates"), tmp.path()).unwrap();
//!
//! let quote = find_entry(&manifest, "Quote");
//! assert!(quote.is_tag_form());
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, ManifestItem, SnippetEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Write a template file with a PHP-style doc header and the given body.
pub fn write_template(dir: &Path, name: &str, fields: &[(&str, &str)], body: &str) {
    let mut source = String::from("<?php\n/*\n");
    for (key, value) in fields {
        source.push_str(&format!("{key}: {value}\n"));
    }
    source.push_str("*/\n?>\n");
    source.push_str(body);
    source.push('\n');
    fs::write(dir.join(name), source).unwrap();
}

/// Build the standard template fixture tree in a temp directory:
///
/// ```text
/// snippet-templates/
/// ├── quote.php          # public tag-form snippet
/// ├── _debug-grid.php    # private (underscore prefix)
/// ├── divider.html       # raw-HTML entry, no tag syntax
/// └── buttons/           # category group
///     ├── primary.php
///     └── ghost.php
/// ```
pub fn setup_templates() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("snippet-templates");
    fs::create_dir_all(dir.join("buttons")).unwrap();

    write_template(
        &dir,
        "quote.php",
        &[
            ("Title", "Quote"),
            ("Shortcode", "[quote author=\"\"][/quote]"),
            ("Styleguide", "[quote author=\"copy-3\"]copy-10[/quote]"),
            ("Instructions", "Use for pull quotes."),
        ],
        "<blockquote class=\"quote\">\n    <p>{{content}}</p>\n    <cite>{{author}}</cite>\n</blockquote>",
    );

    write_template(
        &dir,
        "_debug-grid.php",
        &[
            ("Title", "Debug Grid"),
            ("Shortcode", "[debug_grid][/debug_grid]"),
        ],
        "<div class=\"debug-grid\">{{content}}</div>",
    );

    write_template(
        &dir,
        "divider.html",
        &[("Title", "Divider"), ("HTML", "<hr class=\"fancy\" />")],
        "<hr class=\"fancy\" />",
    );

    write_template(
        &dir.join("buttons"),
        "primary.php",
        &[
            ("Title", "Primary Button"),
            ("Shortcode", "[btn label=\"\"]"),
        ],
        "<button class=\"btn btn-primary\">{{label}}</button>",
    );

    write_template(
        &dir.join("buttons"),
        "ghost.php",
        &[
            ("Title", "Ghost Button"),
            ("Shortcode", "[btn_ghost label=\"\"]"),
        ],
        "<button class=\"btn btn-ghost\">{{label}}</button>",
    );

    tmp
}

// =========================================================================
// Manifest lookups — panic with a clear message on miss
// =========================================================================

/// Find an entry by title, traversing categories. Panics if not found.
pub fn find_entry<'a>(manifest: &'a Manifest, title: &str) -> &'a SnippetEntry {
    manifest
        .entries()
        .find(|e| e.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest.entries().map(|e| e.title.as_str()).collect();
            panic!("entry '{title}' not found. Available: {titles:?}")
        })
}

/// All entry titles in manifest order, categories flattened.
pub fn entry_titles(manifest: &Manifest) -> Vec<&str> {
    manifest.entries().map(|e| e.title.as_str()).collect()
}

/// Labels of the category groups, in manifest order.
pub fn category_labels(manifest: &Manifest) -> Vec<&str> {
    manifest
        .items
        .iter()
        .filter_map(|item| match item {
            ManifestItem::Category(g) => Some(g.label.as_str()),
            ManifestItem::Entry(_) => None,
        })
        .collect()
}
