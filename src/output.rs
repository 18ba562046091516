//! CLI output formatting for all pipeline stages.
//!
//! Output is information-centric, not file-centric: every snippet leads
//! with its positional index and title, with the template path shown as an
//! indented `Source:` line. Categories become unnumbered section headers
//! with their children indented beneath.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Snippets
//! 001 Debug Grid (private)
//!     Source: snippet-templates/_debug-grid.php
//! Buttons
//!     001 Ghost Button
//!         Source: snippet-templates/buttons/ghost.php
//!     002 Primary Button
//!         Source: snippet-templates/buttons/primary.php
//! 002 Divider [html]
//!     Source: snippet-templates/divider.html
//! 003 Quote
//!     Source: snippet-templates/quote.php
//!
//! Indexed 4 snippets (1 private) into snippets.json
//! ```
//!
//! ## Build
//!
//! ```text
//! Registered 4 tags: btn, btn_ghost, debug_grid, quote
//! Styleguide → styleguide.html
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::registry::Registry;
use crate::types::{Manifest, ManifestItem, SnippetEntry};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One snippet header line: index, title, and status markers.
///
/// ```text
/// 001 Quote
/// 002 Divider [html]
/// 003 Debug Grid (private)
/// ```
fn entry_header(index: usize, entry: &SnippetEntry) -> String {
    let mut line = format!("{} {}", format_index(index), entry.title);
    if !entry.is_tag_form() {
        line.push_str(" [html]");
    }
    if !entry.is_public {
        line.push_str(" (private)");
    }
    line
}

fn entry_lines(index: usize, entry: &SnippetEntry, depth: usize, lines: &mut Vec<String>) {
    let base = indent(depth);
    lines.push(format!("{}{}", base, entry_header(index, entry)));
    lines.push(format!("{}    Source: {}", base, entry.source_file));
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan stage output showing the discovered template inventory.
///
/// Top-level entries share one index sequence; each category restarts its
/// own. The summary line counts every entry, categories flattened.
pub fn format_scan_output(manifest: &Manifest, manifest_file: &Path) -> Vec<String> {
    let mut lines = vec!["Snippets".to_string()];

    let mut position = 0;
    for item in &manifest.items {
        match item {
            ManifestItem::Entry(entry) => {
                position += 1;
                entry_lines(position, entry, 0, &mut lines);
            }
            ManifestItem::Category(group) => {
                lines.push(group.label.clone());
                for (i, child) in group.children.iter().enumerate() {
                    entry_lines(i + 1, child, 1, &mut lines);
                }
            }
        }
    }

    let total = manifest.entries().count();
    let private = manifest.entries().filter(|e| !e.is_public).count();
    lines.push(String::new());
    lines.push(match private {
        0 => format!("Indexed {} snippets into {}", total, manifest_file.display()),
        n => format!(
            "Indexed {} snippets ({} private) into {}",
            total,
            n,
            manifest_file.display()
        ),
    });

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, manifest_file: &Path) {
    for line in format_scan_output(manifest, manifest_file) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format build stage output: the registered tag set and, when a styleguide
/// was written, its destination.
pub fn format_build_output(registry: &Registry, styleguide_file: Option<&Path>) -> Vec<String> {
    let mut lines = Vec::new();

    let names: Vec<&str> = registry.names().collect();
    lines.push(match names.len() {
        0 => "Registered 0 tags".to_string(),
        n => format!("Registered {} tags: {}", n, names.join(", ")),
    });

    if let Some(path) = styleguide_file {
        lines.push(format!("Styleguide → {}", path.display()));
    }

    lines
}

/// Print build output to stdout.
pub fn print_build_output(registry: &Registry, styleguide_file: Option<&Path>) {
    for line in format_build_output(registry, styleguide_file) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::scan;
    use crate::test_helpers::setup_templates;

    fn fixture_manifest() -> (tempfile::TempDir, Manifest) {
        let tmp = setup_templates();
        let manifest = scan::scan(&tmp.path().join("snippet-templates"), tmp.path()).unwrap();
        (tmp, manifest)
    }

    #[test]
    fn scan_output_leads_with_section_header() {
        let (_tmp, manifest) = fixture_manifest();
        let lines = format_scan_output(&manifest, Path::new("snippets.json"));
        assert_eq!(lines[0], "Snippets");
    }

    #[test]
    fn scan_output_marks_private_and_html_entries() {
        let (_tmp, manifest) = fixture_manifest();
        let lines = format_scan_output(&manifest, Path::new("snippets.json"));
        let text = lines.join("\n");

        assert!(text.contains("001 Debug Grid (private)"));
        assert!(text.contains("Divider [html]"));
        assert!(!text.contains("Quote [html]"));
    }

    #[test]
    fn scan_output_indents_category_children() {
        let (_tmp, manifest) = fixture_manifest();
        let lines = format_scan_output(&manifest, Path::new("snippets.json"));

        let header = lines.iter().position(|l| l == "Buttons").unwrap();
        assert_eq!(lines[header + 1], "    001 Ghost Button");
        assert_eq!(
            lines[header + 2],
            "        Source: snippet-templates/buttons/ghost.php"
        );
        assert_eq!(lines[header + 3], "    002 Primary Button");
    }

    #[test]
    fn scan_output_restarts_numbering_per_category() {
        let (_tmp, manifest) = fixture_manifest();
        let lines = format_scan_output(&manifest, Path::new("snippets.json"));
        let text = lines.join("\n");

        // Top-level sequence skips category children.
        assert!(text.contains("002 Divider"));
        assert!(text.contains("003 Quote"));
    }

    #[test]
    fn scan_output_summary_counts_private() {
        let (_tmp, manifest) = fixture_manifest();
        let lines = format_scan_output(&manifest, Path::new("snippets.json"));
        assert_eq!(
            lines.last().unwrap(),
            "Indexed 5 snippets (1 private) into snippets.json"
        );
    }

    #[test]
    fn scan_output_summary_without_private() {
        let lines = format_scan_output(&Manifest::default(), Path::new("out.json"));
        assert_eq!(lines.last().unwrap(), "Indexed 0 snippets into out.json");
    }

    #[test]
    fn build_output_lists_registered_tags() {
        let (tmp, manifest) = fixture_manifest();
        let registry =
            Registry::from_manifest(&manifest, tmp.path(), &SiteConfig::default()).unwrap();
        let lines = format_build_output(&registry, None);

        assert_eq!(
            lines[0],
            "Registered 4 tags: btn, btn_ghost, debug_grid, quote"
        );
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn build_output_reports_styleguide_destination() {
        let lines = format_build_output(&Registry::default(), Some(Path::new("styleguide.html")));
        assert_eq!(lines[0], "Registered 0 tags");
        assert_eq!(lines[1], "Styleguide → styleguide.html");
    }
}
