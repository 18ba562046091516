//! Bracketed-tag grammar.
//!
//! Pure functions over `[name attr="value"]content[/name]` markup: name
//! extraction, occurrence matching, attribute parsing, and inner content.
//! Everything here is textual — there is no AST and no recursion.
//!
//! ## Known limitation: same-tag nesting
//!
//! [`occurrences`] pairs each opening tag with the lexically nearest closing
//! tag of the same name. Genuinely nested same-tag content
//! (`[a][a][/a][/a]`) therefore mis-pairs: the first open captures through
//! the first close. This is pinned by tests as the established behavior;
//! a stack-based scanner would be needed to change it.
//!
//! ## Attribute grammar
//!
//! Attributes between `[name` and the first `]` may use single or double
//! quotes. The two quoting styles are scanned in separate passes and merged,
//! double-quoted values winning when the same key appears in both.
//! Unterminated attributes are silently dropped — the grammar is permissive,
//! not validating.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\w*)").unwrap());
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\w*?)='(.*?)'").unwrap());
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s(\w*?)="(.*?)""#).unwrap());

/// Extract the tag identifier immediately following the first `[`.
///
/// Returns `""` when the markup does not contain `[<word>` — registering a
/// snippet with an empty name is a configuration error surfaced by the
/// registry, not here.
pub fn tag_name(markup: &str) -> &str {
    TAG_NAME
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Every top-level span from an opening `[name ...]` through its paired
/// `[/name]`, in document order.
///
/// "Paired" means the nearest following close of the same name (non-greedy,
/// non-recursive — see the module docs for the nesting caveat).
pub fn occurrences<'a>(content: &'a str, name: &str) -> Vec<&'a str> {
    if name.is_empty() {
        return Vec::new();
    }
    let pattern = format!(
        r"(?s)\[{name}(.*?)\[/{name}\]",
        name = regex::escape(name)
    );
    let re = Regex::new(&pattern).unwrap();
    re.find_iter(content).map(|m| m.as_str()).collect()
}

/// Parse `key='value'` / `key="value"` pairs from the opening segment of a
/// tag instance (everything before the first `]`).
///
/// Later double-quote matches overwrite single-quote matches for the same
/// key. Malformed or unterminated pairs are dropped.
pub fn attributes(opening: &str) -> BTreeMap<String, String> {
    let segment = opening.split(']').next().unwrap_or("");

    let mut pairs = BTreeMap::new();
    for captures in SINGLE_QUOTED.captures_iter(segment) {
        pairs.insert(captures[1].to_string(), captures[2].to_string());
    }
    for captures in DOUBLE_QUOTED.captures_iter(segment) {
        pairs.insert(captures[1].to_string(), captures[2].to_string());
    }
    pairs
}

/// Text strictly between the first `]` and the final `[/name]`.
pub fn inner_content(instance: &str, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let pattern = format!(
        r"(?s)\]\s*(.*?)\[/{name}\]\s*$",
        name = regex::escape(name)
    );
    let re = Regex::new(&pattern).unwrap();
    re.captures(instance)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// One parsed tag occurrence from free-form content.
///
/// Produced by [`instances`] for editor-integration surfaces that need the
/// structured form of every tag in a content blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInstance {
    pub attributes: BTreeMap<String, String>,
    pub content: String,
    /// Truthy coercion of the `active` attribute (`"true"` or `"1"`).
    pub active: bool,
    /// Value of the `post_id` attribute, when present.
    pub id: Option<String>,
}

/// Parse every same-name tag occurrence in `content` into structured form.
///
/// The tag name is taken from the first `[` in the content itself, so a blob
/// of repeated `[slide ...]...[/slide]` instances parses without naming the
/// tag up front.
pub fn instances(content: &str) -> Vec<TagInstance> {
    let name = tag_name(content);
    occurrences(content, name)
        .into_iter()
        .map(|occurrence| {
            let mut attrs = attributes(occurrence);
            let active = matches!(attrs.get("active").map(String::as_str), Some("true") | Some("1"));
            attrs.remove("active");
            let id = attrs.remove("post_id");
            TagInstance {
                attributes: attrs,
                content: inner_content(occurrence, name),
                active,
                id,
            }
        })
        .collect()
}
