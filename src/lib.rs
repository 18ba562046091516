//! # Snipguide
//!
//! A snippet template indexer and bracketed-tag renderer with a
//! self-documenting styleguide. Your template directory is the data source:
//! each file becomes a reusable snippet identified by a bracketed tag, and
//! the directory listing becomes a persisted JSON manifest that drives both
//! rendering and the catalog.
//!
//! # Architecture: Scan → Manifest → Render
//!
//! Snipguide processes templates through independent stages, joined by a
//! JSON manifest the later stages consume:
//!
//! ```text
//! 1. Scan       snippet-templates/  →  snippets.json   (filesystem → structured data)
//! 2. Register   manifest            →  tag registry    (tag name → template handler)
//! 3. Render     content + registry  →  expanded HTML   (pages, or the styleguide catalog)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Serve-time cost**: production serving loads the persisted manifest and
//!   never touches the template directory; only build mode rescans.
//! - **Testability**: registration and rendering are pure functions over the
//!   manifest, so tests exercise them without a real content tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists the template directory (one level of category subdirectories), reads doc headers, produces the manifest |
//! | [`registry`] | Stage 2/3 — tag-name → template registry; expands bracketed tags in content through `{{slot}}` substitution |
//! | [`styleguide`] | Renders the manifest into the HTML catalog: live previews, escaped source, attribute lists |
//! | [`header`] | Doc-header parsing — Title, Shortcode/HTML, Styleguide preview overrides, Instructions |
//! | [`tag`] | Bracketed-tag grammar — tag names, attribute pairs, occurrences, inner content |
//! | [`filler`] | Placeholder directives (`copy-5`, `image-300x200`, `ul-3`) expanded in previews |
//! | [`urls`] | Attribute URL normalization — anchor/img unwrapping, absolute URL rules |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Manifest data model serialized to `snippets.json` |
//! | [`output`] | CLI output formatting — inventory display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Textual Substitution Over a Template Engine
//!
//! Snippet bodies are plain markup with `{{name}}` slots filled by literal
//! string substitution. No conditionals, no loops, no expression language:
//! a snippet that needs logic is a snippet that should be split in two. This
//! keeps template files readable by the designers who author them and makes
//! the styleguide's escaped source display exact.
//!
//! ## Maud for the Styleguide
//!
//! Catalog HTML is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system. Malformed markup is a build error,
//! interpolation is auto-escaped by default, and `PreEscaped` marks the
//! three places raw output is intentional (previews, instructions, and
//! already-entitized source) so they are auditable at a glance.
//!
//! ## The Manifest Is a Bare JSON Array
//!
//! `snippets.json` serializes as an array of entries and category groups,
//! not an object with a wrapper key. The file is meant to be consumed by
//! other tooling (editor plugins, site search) and diffed in review; the
//! flat array keeps it stable and obvious.
//!
//! ## Previews Use the Production Render Path
//!
//! The styleguide renders each preview through the same registry expansion
//! that serves page content. There is no parallel "demo renderer" to drift
//! out of sync: if the catalog shows it, a page renders it identically.

pub mod config;
pub mod filler;
pub mod header;
pub mod output;
pub mod registry;
pub mod scan;
pub mod styleguide;
pub mod tag;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
