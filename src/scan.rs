//! Template directory scanning and manifest generation.
//!
//! Build stage of the snipguide pipeline. Walks the template directory and
//! produces the [`Manifest`] that the registry and the styleguide consume.
//!
//! ## Directory structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── snippets.json                # Persisted manifest (written here)
//! └── snippet-templates/           # Template root
//!     ├── quote.php                # Snippet (public)
//!     ├── _debug-grid.php          # `_` prefix = developer-only (private)
//!     ├── divider.html             # Raw-HTML entry (no tag syntax)
//!     └── buttons/                 # Subdirectory = category group
//!         ├── primary.php
//!         └── ghost.php
//! ```
//!
//! Recursion is exactly one level deep: a subdirectory becomes a category
//! whose files become child entries; anything nested further is ignored.
//! Entries keep directory-listing order (lexicographic, the way `glob`
//! lists) — the manifest is never re-sorted.
//!
//! ## Classification
//!
//! Each file's doc header decides its kind: a `Shortcode` field makes a
//! tag-form entry, an `HTML` field a raw-HTML entry, with the tag form
//! winning when both are present. The filename prefix rule (`_`) decides
//! visibility. Every header field is optional; files with neither form
//! still land in the manifest (they are inert but visible to tooling).
//!
//! Scanning only ever runs in build mode. Serve mode reads the persisted
//! manifest and never rebuilds — see [`crate::config::Mode`].

use crate::header;
use crate::types::{CategoryGroup, Manifest, ManifestItem, SnippetEntry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template directory not found: {0}")]
    MissingTemplateDir(PathBuf),
    #[error("template path escapes the content root: {0}")]
    OutsideContentRoot(PathBuf),
}

/// Scan the template directory into a manifest.
///
/// `templates_dir` must live under `content_root`; `source_file` paths are
/// stored relative to the root so the manifest stays portable across
/// environments.
pub fn scan(templates_dir: &Path, content_root: &Path) -> Result<Manifest, ScanError> {
    if !templates_dir.is_dir() {
        return Err(ScanError::MissingTemplateDir(templates_dir.to_path_buf()));
    }

    let mut items = Vec::new();
    for path in list_entries(templates_dir)? {
        if path.is_dir() {
            let mut children = Vec::new();
            for child in list_entries(&path)? {
                if child.is_file() {
                    children.push(build_entry(&child, content_root)?);
                }
            }
            items.push(ManifestItem::Category(CategoryGroup {
                label: ucfirst(&file_name(&path)),
                children,
            }));
        } else {
            items.push(ManifestItem::Entry(build_entry(&path, content_root)?));
        }
    }

    Ok(Manifest { items })
}

/// List directory children in lexicographic order, skipping dotfiles.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !file_name(p).starts_with('.'))
        .collect();
    entries.sort();
    Ok(entries)
}

/// Build one manifest entry from a template file.
fn build_entry(path: &Path, content_root: &Path) -> Result<SnippetEntry, ScanError> {
    let meta = header::read_header(path)?;
    let source_file = path
        .strip_prefix(content_root)
        .map_err(|_| ScanError::OutsideContentRoot(path.to_path_buf()))?
        .to_string_lossy()
        .to_string();

    Ok(SnippetEntry {
        title: meta.title,
        tag_markup: meta.shortcode,
        html_body: meta.html,
        previews: meta.previews,
        instructions: meta.instructions,
        source_file,
        is_public: !file_name(path).starts_with('_'),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Upper-case the first character, the category label convention.
fn ucfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
