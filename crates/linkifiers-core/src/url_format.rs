// Rust guideline compliant 2026-02-06

//! URL format strings.
//!
//! A linkifier URL is a template with `%(name)s` placeholders. Stored
//! templates only use positional placeholders (`%(1)s`), so submitted
//! templates have their named placeholders rewritten against the pattern's
//! capture groups.

use crate::pattern::GroupInfo;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://[^\s/?#]+|mailto:)\S*$").expect("static URL regex is valid")
});

/// A lexical piece of a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text.
    Text(&'a str),
    /// `%%`.
    Percent,
    /// `%(key)s`.
    Placeholder(&'a str),
}

/// Splits a template into segments.
///
/// # Errors
///
/// Returns `InvalidUrlFormat` for a stray `%`, an unterminated placeholder,
/// or a conversion other than `s`.
pub fn segments(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(at) = rest.find('%') {
        if at > 0 {
            out.push(Segment::Text(&rest[..at]));
        }
        let tail = &rest[at + 1..];
        if let Some(after) = tail.strip_prefix('%') {
            out.push(Segment::Percent);
            rest = after;
            continue;
        }
        let Some(inner) = tail.strip_prefix('(') else {
            return Err(Error::InvalidUrlFormat(format!(
                "stray '%' in '{}' (use '%%' for a literal percent)",
                template
            )));
        };
        let Some(close) = inner.find(')') else {
            return Err(Error::InvalidUrlFormat(format!(
                "unterminated placeholder in '{}'",
                template
            )));
        };
        let key = &inner[..close];
        let Some(after) = inner[close + 1..].strip_prefix('s') else {
            return Err(Error::InvalidUrlFormat(format!(
                "placeholder '%({})' must use the 's' conversion",
                key
            )));
        };
        out.push(Segment::Placeholder(key));
        rest = after;
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    Ok(out)
}

/// Rewrites a submitted template into its stored positional form.
///
/// # Errors
///
/// Returns `InvalidUrlFormat` for malformed templates and
/// `PlaceholderOutOfRange` for placeholders with no matching group.
pub fn canonicalize(template: &str, groups: &[GroupInfo]) -> Result<String> {
    let stripped: String = segments(template)?
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => *text,
            Segment::Percent => "%",
            Segment::Placeholder(_) => "x",
        })
        .collect();
    if !URL_SHAPE.is_match(&stripped) {
        return Err(Error::InvalidUrlFormat(format!(
            "'{}' is not an http(s) or mailto URL",
            template
        )));
    }

    let mut out = String::with_capacity(template.len());
    for segment in segments(template)? {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Percent => out.push_str("%%"),
            Segment::Placeholder(key) => {
                let index = resolve(key, groups)?;
                out.push_str(&format!("%({})s", index));
            }
        }
    }
    Ok(out)
}

fn resolve(key: &str, groups: &[GroupInfo]) -> Result<usize> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        return match key.parse::<usize>() {
            Ok(index) if (1..=groups.len()).contains(&index) => Ok(index),
            _ => Err(Error::PlaceholderOutOfRange(format!(
                "%({})s but the pattern has {} group(s)",
                key,
                groups.len()
            ))),
        };
    }
    groups
        .iter()
        .find(|g| g.name() == Some(key))
        .map(|g| g.index)
        .ok_or_else(|| {
            Error::PlaceholderOutOfRange(format!("%({})s names no group in the pattern", key))
        })
}

/// Substitutes capture groups into a stored template.
///
/// `groups[0]` is group 1. Missing or unmatched groups expand to the empty
/// string, and a malformed template is returned verbatim.
pub fn expand(template: &str, groups: &[Option<&str>]) -> String {
    let Ok(segments) = segments(template) else {
        log::warn!("Stored URL template '{}' is malformed", template);
        return template.to_string();
    };
    let mut out = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Placeholder(key) => {
                let value = key
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|i| groups.get(i).copied().flatten())
                    .unwrap_or_default();
                out.push_str(value);
            }
        }
    }
    out
}
