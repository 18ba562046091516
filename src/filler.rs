//! Placeholder content generation for styleguide previews.
//!
//! Preview text can embed compact directives that expand into generated
//! sample content, so template authors never hand-write filler:
//!
//! - `copy-40` — first 40 words of the stock paragraph; bare `copy` is the
//!   whole paragraph
//! - `image-300x200` — a placeholder image URL; bare `image` defaults to
//!   1200x360
//! - `ul-3` / `ol-3-5` — a list of N items, each item `copy`-generated with
//!   the given word count (random 2–7 words when omitted; one count is
//!   chosen per directive and shared by every item in that list)
//!
//! Substitution is collision-safe: all distinct directive occurrences are
//! resolved first, then replaced longest-first as literal strings, so
//! `copy-10` never clobbers the inside of `copy-100`.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:copy(?:-\d+)?|image(?:-\d+x\d+)?|ul-\d+(?:-\d+)?|ol-\d+(?:-\d+)?)\b")
        .unwrap()
});

const PLACEHOLD_BASE: &str = "http://placehold.it/";
const DEFAULT_IMAGE_SIZE: (u32, u32) = (1200, 360);

/// Stock long-form filler paragraph, trimmed to length by the `copy` rule.
const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit. Sapiente, facere, molestias! Consectetur rem, voluptatem. Vero blanditiis exercitationem quo repellendus aut rerum. Blanditiis, nulla officia doloribus non praesentium architecto voluptatem quos porro nobis sed vero exercitationem voluptas corporis, ducimus dolorem temporibus consectetur ipsam consequuntur? Quidem, veniam. Tenetur, aliquam impedit nam, commodi necessitatibus sunt perferendis, nostrum sit quia voluptatum cupiditate temporibus dignissimos atque. Neque repellat suscipit eveniet dolorem error aliquam eius veritatis saepe quia rem minima, beatae laboriosam nesciunt vitae vero. Cumque quos laborum accusantium, magnam molestias optio, animi asperiores est explicabo, quia repellendus quidem iusto! Modi, nesciunt, autem. Ullam adipisci officiis laboriosam nisi pariatur nulla eum aliquid dignissimos odio eveniet dolorum, totam quam nostrum, blanditiis eos id esse modi molestiae natus provident accusamus explicabo accusantium. Nobis dignissimos ipsum, asperiores sapiente nihil aliquid! Quasi alias incidunt, cum placeat, ipsam quaerat dignissimos aperiam ullam id laborum numquam enim iusto praesentium quod distinctio deleniti porro explicabo. Dolorum sapiente tempore iste atque debitis quisquam repudiandae similique ipsam, vitae porro quaerat officia, quidem eius. Cum odio inventore itaque consectetur dolor tempore. Unde ea maiores quo ratione quia ipsum non incidunt dignissimos nostrum tempore optio nam eum adipisci suscipit quis voluptatum, tenetur error obcaecati magni rerum, ipsam consequatur, molestiae aliquid. Cum fugiat est facilis assumenda, illum veniam enim placeat tempora a quae delectus soluta neque saepe aliquam omnis libero quaerat reiciendis reprehenderit dolorum natus? Iusto corporis recusandae nostrum deleniti neque impedit doloribus accusantium similique qui provident eaque unde possimus tenetur sit explicabo rem sed consequuntur ea est velit, eos porro quisquam minus molestias. Aperiam, deserunt, pariatur! Laudantium est quos laboriosam voluptates rem culpa assumenda omnis officia enim deserunt praesentium dolor alias atque eveniet officiis deleniti animi quibusdam, amet illo tenetur! Fugit dolorem maxime voluptate veritatis placeat facere deleniti fugiat debitis sed, labore, ad laboriosam officia laborum aut.";

/// One recognized placeholder directive, parsed from its textual form.
///
/// Closed-variant dispatch: each kind knows how to expand itself, selected
/// by exhaustive matching rather than name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `copy` / `copy-<n>`: first `n` words of the stock paragraph.
    Copy { words: Option<usize> },
    /// `image` / `image-<w>x<h>`: placeholder image URL.
    Image { size: Option<(u32, u32)> },
    /// `ul-<count>` / `ul-<count>-<words>`.
    UnorderedList { items: usize, words: Option<usize> },
    /// `ol-<count>` / `ol-<count>-<words>`.
    OrderedList { items: usize, words: Option<usize> },
}

impl Directive {
    /// Parse a raw directive occurrence (as matched by the directive
    /// pattern) into its structured form.
    pub fn parse(raw: &str) -> Option<Directive> {
        let (kind, args) = match raw.split_once('-') {
            Some((kind, args)) => (kind, Some(args)),
            None => (raw, None),
        };

        match kind {
            "copy" => Some(Directive::Copy {
                words: args.and_then(|a| a.parse().ok()),
            }),
            "image" => {
                let size = args.and_then(|a| {
                    let (w, h) = a.split_once('x')?;
                    Some((w.parse().ok()?, h.parse().ok()?))
                });
                Some(Directive::Image { size })
            }
            "ul" | "ol" => {
                let args = args?;
                let (count, words) = match args.split_once('-') {
                    Some((count, words)) => (count.parse().ok()?, words.parse().ok()),
                    None => (args.parse().ok()?, None),
                };
                if kind == "ul" {
                    Some(Directive::UnorderedList {
                        items: count,
                        words,
                    })
                } else {
                    Some(Directive::OrderedList {
                        items: count,
                        words,
                    })
                }
            }
            _ => None,
        }
    }

    /// Expand into generated content.
    pub fn expand(self) -> String {
        match self {
            Directive::Copy { words } => copy_text(words),
            Directive::Image { size } => {
                let (w, h) = size.unwrap_or(DEFAULT_IMAGE_SIZE);
                format!("{PLACEHOLD_BASE}{w}x{h}")
            }
            Directive::UnorderedList { items, words } => list_text("ul", items, words),
            Directive::OrderedList { items, words } => list_text("ol", items, words),
        }
    }
}

/// First `words` words of the stock paragraph; the whole paragraph when
/// no count is given.
fn copy_text(words: Option<usize>) -> String {
    let all: Vec<&str> = LOREM.split_whitespace().collect();
    let take = words.unwrap_or(all.len()).min(all.len());
    all[..take].join(" ")
}

/// A `<ul>`/`<ol>` of `items` list items. One word count is chosen up front
/// (given, or random 2–7) and reused for every `<li>` in this invocation.
fn list_text(element: &str, items: usize, words: Option<usize>) -> String {
    let count = words.unwrap_or_else(|| rand::rng().random_range(2..=7));
    let item = copy_text(Some(count));

    let mut out = format!("<{element}>");
    for _ in 0..items {
        out.push_str("<li>");
        out.push_str(&item);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{element}>"));
    out
}

/// Replace every placeholder directive in `content` with generated text.
///
/// Distinct occurrences are expanded once each, then applied longest-first
/// so overlapping spellings (`copy-10` inside `copy-100`) cannot collide.
pub fn apply(content: &str) -> String {
    let mut raw_matches: Vec<&str> = Vec::new();
    for found in DIRECTIVE.find_iter(content) {
        if !raw_matches.contains(&found.as_str()) {
            raw_matches.push(found.as_str());
        }
    }
    if raw_matches.is_empty() {
        return content.to_string();
    }

    let mut replacements: Vec<(&str, String)> = raw_matches
        .into_iter()
        .filter_map(|raw| Directive::parse(raw).map(|d| (raw, d.expand())))
        .collect();
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = content.to_string();
    for (raw, generated) in replacements {
        out = out.replace(raw, &generated);
    }
    out
}
