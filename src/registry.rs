//! Tag registry and template rendering.
//!
//! The serve-side consumer of the manifest: every tag-form entry is
//! registered as a handler keyed by its tag name, and free-form page
//! content is expanded by resolving each registered occurrence against the
//! entry's template file.
//!
//! ## Rendering
//!
//! Templates are plain markup with `{{name}}` substitution slots. On
//! invocation the call-site attributes are URL-normalized
//! ([`crate::urls::normalize`]) and substituted by name; `{{content}}`
//! receives the tag's inner content. Substitution is purely textual — slots
//! with no matching attribute render empty. The template's leading doc
//! header is stripped before substitution ([`crate::header::body`]).
//!
//! The styleguide renders previews through this same path, so preview and
//! production output are byte-identical for identical attributes.
//!
//! ## Failure containment
//!
//! A template file deleted after the manifest was built fails that one
//! snippet, not the page: [`Registry::expand`] replaces the occurrence with
//! an HTML comment marker and carries on. Registering an entry whose markup
//! yields an empty tag name is a configuration error and fails construction
//! — it would otherwise surface only at render time, far from the mistake.

use crate::config::SiteConfig;
use crate::header;
use crate::tag;
use crate::types::Manifest;
use crate::urls;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("entry '{source_file}' has tag markup without a leading [name")]
    EmptyTagName { source_file: String },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One registered snippet handler.
#[derive(Debug, Clone)]
pub struct Handler {
    pub name: String,
    /// Absolute template path, resolved against the content root.
    pub template: PathBuf,
}

/// The set of registered tag handlers for one manifest snapshot.
///
/// Construction registers every tag-form entry, public and private alike
/// (private only hides the entry from the styleguide). Duplicate tag names
/// are last-write-wins in manifest order.
#[derive(Debug, Default)]
pub struct Registry {
    handlers: BTreeMap<String, Handler>,
    base_url: String,
}

impl Registry {
    /// Register every tag-form manifest entry.
    pub fn from_manifest(
        manifest: &Manifest,
        content_root: &Path,
        config: &SiteConfig,
    ) -> Result<Registry, RegistryError> {
        let mut handlers = BTreeMap::new();
        for entry in manifest.entries() {
            if !entry.is_tag_form() {
                continue;
            }
            let name = tag::tag_name(&entry.tag_markup);
            if name.is_empty() {
                return Err(RegistryError::EmptyTagName {
                    source_file: entry.source_file.clone(),
                });
            }
            handlers.insert(
                name.to_string(),
                Handler {
                    name: name.to_string(),
                    template: content_root.join(&entry.source_file),
                },
            );
        }
        Ok(Registry {
            handlers,
            base_url: config.base_url.clone(),
        })
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tag names, alphabetical.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Render one registered tag with call-site attributes and inner
    /// content, capturing the template's full textual output.
    pub fn render(
        &self,
        name: &str,
        attrs: &BTreeMap<String, String>,
        inner: &str,
    ) -> Result<String, RenderError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(PathBuf::from(name)))?;

        let source = fs::read_to_string(&handler.template).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateNotFound(handler.template.clone())
            } else {
                RenderError::Io(e)
            }
        })?;
        let body = header::body(&source);

        let normalized: BTreeMap<&str, String> = attrs
            .iter()
            .map(|(key, value)| (key.as_str(), urls::normalize(value, &self.base_url)))
            .collect();

        let rendered = PLACEHOLDER.replace_all(body, |caps: &regex::Captures| {
            let slot = &caps[1];
            if slot == "content" {
                inner.to_string()
            } else {
                normalized.get(slot).cloned().unwrap_or_default()
            }
        });
        // The file's trailing newline is capture noise, not snippet output.
        Ok(rendered.trim_end().to_string())
    }

    /// Resolve every registered tag occurrence in free-form content.
    ///
    /// Paired occurrences (`[name ...]...[/name]`) are replaced first, then
    /// standalone opening tags (`[name ...]`). A failing snippet is replaced
    /// with a comment marker instead of failing the whole page.
    pub fn expand(&self, content: &str) -> String {
        let mut out = content.to_string();
        for handler in self.handlers.values() {
            out = self.expand_tag(&out, &handler.name);
        }
        out
    }

    fn expand_tag(&self, content: &str, name: &str) -> String {
        let mut out = content.to_string();

        let paired: Vec<String> = tag::occurrences(&out, name)
            .into_iter()
            .map(str::to_string)
            .collect();
        for occurrence in paired {
            let attrs = tag::attributes(&occurrence);
            let inner = tag::inner_content(&occurrence, name);
            let rendered = self
                .render(name, &attrs, &inner)
                .unwrap_or_else(|_| broken_marker(name));
            out = out.replacen(&occurrence, &rendered, 1);
        }

        // Standalone opens left after paired replacement, e.g. `[hr]` or a
        // registered example invocation without a closing tag.
        let open_only = Regex::new(&format!(
            r"\[{name}(\s[^\]]*)?\]",
            name = regex::escape(name)
        ))
        .unwrap();
        let standalone: Vec<String> = open_only
            .find_iter(&out)
            .map(|m| m.as_str().to_string())
            .collect();
        for occurrence in standalone {
            let attrs = tag::attributes(&occurrence);
            let rendered = self
                .render(name, &attrs, "")
                .unwrap_or_else(|_| broken_marker(name));
            out = out.replacen(&occurrence, &rendered, 1);
        }

        out
    }
}

fn broken_marker(name: &str) -> String {
    format!("<!-- snippet \"{name}\" unavailable -->")
}

/// Strip the paragraph wrapping and line breaks a rich-text editor inserts
/// directly around tag brackets. Applied to host content before expansion.
pub fn fix_editor_artifacts(content: &str) -> String {
    content
        .replace("<p>[", "[")
        .replace("]</p>", "]")
        .replace("]<br />", "]")
}
