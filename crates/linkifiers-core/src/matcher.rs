// Rust guideline compliant 2026-02-06

//! Applies a realm's linkifiers to message text.

use crate::models::Linkifier;
use crate::{translate, url_format};
use fancy_regex::Regex;

/// A linkifier compiled for matching.
#[derive(Debug)]
struct CompiledLinkifier {
    regex: Regex,
    url_format_string: String,
    order: u32,
}

/// A span of text claimed by a linkifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The matched text.
    pub text: String,
    /// The expanded URL.
    pub url: String,
    /// Order of the linkifier that claimed the span.
    pub order: u32,
}

/// Compiled linkifiers of one realm, in ascending order.
#[derive(Debug, Default)]
pub struct Matcher {
    rules: Vec<CompiledLinkifier>,
}

impl Matcher {
    /// Compiles linkifiers for matching.
    ///
    /// Rules are applied in ascending `order`. A stored rule that no longer
    /// compiles is skipped with a warning.
    pub fn new(linkifiers: &[Linkifier]) -> Self {
        let mut sorted: Vec<&Linkifier> = linkifiers.iter().collect();
        sorted.sort_by_key(|l| l.order);

        let rules = sorted
            .into_iter()
            .filter_map(|linkifier| match translate::compile(&linkifier.pattern) {
                Ok(regex) => Some(CompiledLinkifier {
                    regex,
                    url_format_string: linkifier.url_format_string.clone(),
                    order: linkifier.order,
                }),
                Err(e) => {
                    log::warn!("Skipping linkifier '{}': {}", linkifier.pattern, e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule compiled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Finds every link in `text`, sorted by position.
    ///
    /// The first rule in order to match a span claims it. Each later rule
    /// is matched only against the text left unclaimed by earlier rules,
    /// one gap at a time. Empty matches are ignored.
    pub fn find_links(&self, text: &str) -> Vec<LinkMatch> {
        let mut links: Vec<LinkMatch> = Vec::new();

        for rule in &self.rules {
            let mut found = Vec::new();
            for (gap_start, gap_end) in unclaimed_gaps(&links, text.len()) {
                rule.collect_links(&text[gap_start..gap_end], gap_start, &mut found);
            }
            links.extend(found);
            links.sort_by_key(|link| link.start);
        }

        links
    }

    /// Wraps every link in `text` as `<a href="URL">TEXT</a>`.
    ///
    /// Only the anchors are HTML: link text has `&`, `<` and `>` escaped and
    /// the URL additionally has `"` escaped. Text outside links is copied
    /// as-is, so text with no matches is returned unchanged.
    pub fn apply(&self, text: &str) -> String {
        let links = self.find_links(text);
        if links.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + links.len() * 16);
        let mut cursor = 0;
        for link in &links {
            out.push_str(&text[cursor..link.start]);
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&link.url).replace('"', "&quot;"),
                escape_html(&link.text)
            ));
            cursor = link.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

impl CompiledLinkifier {
    /// Appends this rule's matches in `segment`, offsetting spans by `offset`.
    fn collect_links(&self, segment: &str, offset: usize, links: &mut Vec<LinkMatch>) {
        for result in self.regex.captures_iter(segment) {
            let captures = match result {
                Ok(captures) => captures,
                Err(e) => {
                    log::warn!("Linkifier {} stopped matching: {}", self.order, e);
                    break;
                }
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.start() == whole.end() {
                continue;
            }

            let groups: Vec<Option<&str>> = (1..captures.len())
                .map(|i| captures.get(i).map(|m| m.as_str()))
                .collect();
            links.push(LinkMatch {
                start: offset + whole.start(),
                end: offset + whole.end(),
                text: whole.as_str().to_string(),
                url: url_format::expand(&self.url_format_string, &groups),
                order: self.order,
            });
        }
    }
}

/// Byte ranges of `len` bytes of text not covered by `links`, which must be
/// sorted by start and non-overlapping.
fn unclaimed_gaps(links: &[LinkMatch], len: usize) -> Vec<(usize, usize)> {
    let mut gaps = Vec::with_capacity(links.len() + 1);
    let mut cursor = 0;
    for link in links {
        if link.start > cursor {
            gaps.push((cursor, link.start));
        }
        cursor = link.end;
    }
    if cursor < len {
        gaps.push((cursor, len));
    }
    gaps
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
