//! Styleguide catalog generation.
//!
//! Renders the manifest into a single self-documenting HTML fragment: every
//! public entry gets a live preview, pretty-printed source, a parsed
//! attribute list, instructions, and its template location. Categories
//! become anchored section headings; entries keep manifest order.
//!
//! Previews run through the exact render path the registry uses for page
//! content ([`crate::registry::Registry::expand`]), after placeholder
//! directives are expanded ([`crate::filler::apply`]) — what the styleguide
//! shows is byte-identical to what a page would render.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): type-safe,
//! auto-escaped templates. `PreEscaped` appears only where raw output is the
//! point — the live preview, verbatim instructions, and the pretty-printed
//! source (which is already entity-escaped by [`pretty_print`]).

use crate::filler;
use crate::registry::Registry;
use crate::tag;
use crate::types::{CategoryGroup, Manifest, ManifestItem, SnippetEntry};
use maud::{Markup, PreEscaped, html};

/// Render the full catalog fragment for a manifest snapshot.
///
/// Entries that are private or carry the `hidden` sentinel are skipped;
/// a category whose children are all skipped still emits its heading.
pub fn render_catalog(manifest: &Manifest, registry: &Registry) -> Markup {
    html! {
        @for item in &manifest.items {
            @match item {
                ManifestItem::Category(group) => {
                    (render_category(group, registry))
                }
                ManifestItem::Entry(entry) => {
                    @if let Some(block) = render_entry(entry, registry) {
                        (block)
                    }
                }
            }
            hr;
        }
    }
}

fn render_category(group: &CategoryGroup, registry: &Registry) -> Markup {
    let anchor = slugify(&group.label);
    html! {
        h2.waypoint id=(anchor) data-destination={ "wp-" (anchor) } {
            (group.label)
            a href={ "#" (anchor) } { sup { (PreEscaped("&#9875;")) } }
        }
        @for child in &group.children {
            @if let Some(block) = render_entry(child, registry) {
                (block)
            }
        }
    }
}

/// One catalog block, or `None` for private/hidden entries.
fn render_entry(entry: &SnippetEntry, registry: &Registry) -> Option<Markup> {
    if entry.hidden_from_styleguide() {
        return None;
    }

    let anchor = slugify(&entry.title);
    let preview = preview_html(entry, registry);
    let kind = if entry.is_tag_form() { "shortcode" } else { "html" };

    Some(html! {
        h3 id=(anchor) {
            (entry.title)
            a href={ "#" (anchor) } { sup { (PreEscaped("&#9875;")) } }
        }
        div class={ (kind) "-" (anchor) } {
            (PreEscaped(preview))
        }
        @if entry.is_tag_form() {
            h5 { "Shortcode" }
            pre.shortcode { (PreEscaped(pretty_print(&entry.tag_markup))) }
            @let attrs = tag::attributes(&entry.tag_markup);
            @if !attrs.is_empty() {
                h5 { "Attributes" }
                ul.attributes {
                    @for (name, value) in &attrs {
                        li {
                            (name)
                            @if !value.is_empty() {
                                " " span { (value) }
                            }
                        }
                    }
                }
            }
        } @else if !entry.html_body.is_empty() {
            h5 { "HTML" }
            pre.html { (PreEscaped(pretty_print(&entry.html_body))) }
        }
        @if !entry.instructions.is_empty() {
            h5 { "Instructions" }
            (PreEscaped(entry.instructions.clone()))
        }
        h5 { "File Template" }
        small.file { (entry.source_file) }
    })
}

/// The live preview: first override (or the primary value) plus any further
/// overrides, each with filler directives expanded, then rendered through
/// the registry's production path.
fn preview_html(entry: &SnippetEntry, registry: &Registry) -> String {
    let mut source = String::new();
    source.push_str(entry.preview(1).unwrap_or_else(|| entry.primary_value()));
    for slot in 2..=crate::header::PREVIEW_SLOTS {
        if let Some(extra) = entry.preview(slot) {
            source.push_str(extra);
        }
    }
    registry.expand(&filler::apply(&source))
}

/// Lower-case anchor slug: non-alphanumerics become dashes, collapsed and
/// trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = true; // swallow leading dashes
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// ============================================================================
// Pretty-print escaping
// ============================================================================

/// Ordered substitution table applied before entity escaping. Later rules
/// consume text earlier rules produce, so the order is load-bearing — do
/// not reorder.
const PRE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("][/", "&#93;\n&#91;&#47;"),
    ("[/", "\n&#91;&#47;"),
    ("[", "&#91;"),
    ("]", "&#93;\n"),
    ("</ul>", "\n</ul>"),
    ("<li", "\n<li"),
    ("<div", "\n<div"),
    ("</div></div>", "</div>\n</div>"),
    ("</table>", "\n</table>"),
    ("</thead>", "\n</thead>"),
    ("<tfoot", "\n<tfoot"),
    ("</tfoot", "\n</tfoot>"),
    ("<tbody", "\n<tbody"),
    ("</tbody>", "\n</tbody>"),
    ("<caption", "\n<caption"),
    ("<tr", "\n<tr"),
    ("</tr", "\n</tr"),
    ("<td", "\n<td"),
    ("<th", "\n<th"),
];

/// Escape `rawSource` for display inside a `<pre>` block: structural
/// newlines inserted, every bracket converted to its entity form, and all
/// remaining text entity-escaped without double-encoding entities the
/// substitution table already produced.
pub fn pretty_print(raw: &str) -> String {
    let mut text = raw.to_string();
    for (from, to) in PRE_SUBSTITUTIONS {
        text = text.replace(from, to);
    }
    escape_ampersands(&text)
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape bare `&` as `&amp;`, leaving well-formed entities untouched so
/// the bracket rules above are not double-encoded.
fn escape_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        out.push_str(if is_entity_start(rest) { "&" } else { "&amp;" });
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

/// True when `text` starts with a well-formed entity: `&name;`, `&#123;`,
/// or `&#x1F;`.
fn is_entity_start(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('&') else {
        return false;
    };
    let Some(body_end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..body_end];
    if let Some(num) = body.strip_prefix('#') {
        if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
        } else {
            !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
        }
    } else {
        !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
