//! Shared manifest types.
//!
//! The manifest is the persisted index of every discovered snippet template.
//! It is written by the scan stage (build mode only) and read by the registry
//! and the styleguide renderer, which treat it as immutable for the duration
//! of one invocation. Readers and the writer are not synchronized against
//! each other — builds are rare and reads take a whole-file snapshot, so a
//! stale read simply serves the previous build.
//!
//! On disk the manifest is a pretty-printed JSON array, replaced whole-file
//! on every build. Categories (one directory level below the template root)
//! and plain entries live side by side in directory-listing order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted snippet index: an ordered sequence of entries and
/// category groups, in directory-listing order (never sorted afterwards).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub items: Vec<ManifestItem>,
}

/// One top-level manifest element. A subdirectory of the template root
/// becomes a [`CategoryGroup`]; a file becomes a [`SnippetEntry`] directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestItem {
    Category(CategoryGroup),
    Entry(SnippetEntry),
}

/// Entries grouped under a subdirectory of the template root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Directory basename with the first letter upper-cased.
    pub label: String,
    pub children: Vec<SnippetEntry>,
}

/// One discovered snippet template.
///
/// Exactly one of `tag_markup` / `html_body` drives registration and preview;
/// the tag form wins when both are present in the header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetEntry {
    /// Human label from the `Title` header field.
    pub title: String,
    /// Literal example tag invocation, e.g. `[quote author=""][/quote]`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag_markup: String,
    /// Raw HTML body for entries without tag syntax.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_body: String,
    /// Up to five styleguide preview overrides (`Styleguide`,
    /// `Styleguide_2` .. `Styleguide_5`). Override 1 supersedes
    /// `tag_markup`/`html_body` for preview purposes only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previews: Vec<String>,
    /// Free-text documentation, emitted verbatim in the styleguide.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    /// Template path relative to the content root.
    pub source_file: String,
    /// Files whose basename starts with `_` are developer-only.
    pub is_public: bool,
}

/// Sentinel value for the first preview override that hides an otherwise
/// public entry from the styleguide catalog.
pub const HIDDEN_SENTINEL: &str = "hidden";

impl SnippetEntry {
    /// The value that drives registration and default preview: tag markup
    /// when present, the raw HTML body otherwise.
    pub fn primary_value(&self) -> &str {
        if self.tag_markup.is_empty() {
            &self.html_body
        } else {
            &self.tag_markup
        }
    }

    pub fn is_tag_form(&self) -> bool {
        !self.tag_markup.is_empty()
    }

    /// Preview override by 1-based slot, if present and non-empty.
    pub fn preview(&self, slot: usize) -> Option<&str> {
        self.previews
            .get(slot.checked_sub(1)?)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// True when the entry is excluded from the catalog: private, or its
    /// first preview override is the literal `hidden` sentinel.
    pub fn hidden_from_styleguide(&self) -> bool {
        !self.is_public || self.preview(1) == Some(HIDDEN_SENTINEL)
    }
}

impl Manifest {
    /// Iterate every entry, traversing into category children.
    pub fn entries(&self) -> impl Iterator<Item = &SnippetEntry> {
        self.items.iter().flat_map(|item| match item {
            ManifestItem::Entry(entry) => std::slice::from_ref(entry).iter(),
            ManifestItem::Category(group) => group.children.iter(),
        })
    }

    /// Read a manifest snapshot from disk.
    ///
    /// A missing file is not an error — serve mode degrades to an empty
    /// registry and an empty catalog. Malformed JSON propagates: a manifest
    /// that cannot be parsed must not be guessed at.
    pub fn load(path: &Path) -> Result<Option<Manifest>, ManifestError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Persist as pretty-printed JSON, replacing the file unconditionally.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
