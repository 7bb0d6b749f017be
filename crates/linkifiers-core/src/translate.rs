// Rust guideline compliant 2026-02-06

//! Pattern translation.
//!
//! Turns a validated pattern into its canonical stored form: named groups
//! become positional groups, named backreferences become numbered ones, and
//! inline flags are lifted into a single whole-pattern flag prefix. The same
//! tree also renders the `/body/flags` form used by client-side rendering.

use crate::pattern::{self, Alternation, Flag, GroupType, Node, ParsedPattern, Reference};
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Whole-pattern flags, kept sorted so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(BTreeSet<Flag>);

impl FlagSet {
    /// Returns true if `flag` is set.
    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(&flag)
    }

    /// Returns true if no flag is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in &self.0 {
            write!(f, "{}", flag.letter())?;
        }
        Ok(())
    }
}

/// Result of translating a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Canonical stored pattern: optional `(?flags)` prefix plus body.
    pub canonical: String,
    /// Number of capture groups.
    pub group_count: usize,
    /// Whole-pattern flags.
    pub flags: FlagSet,
    /// `/body/flags` rendering for the client-side dialect.
    pub client_pattern: String,
}

/// Validates and translates a pattern in one step.
///
/// # Errors
///
/// Returns any validation or translation error.
pub fn canonicalize(pattern: &str) -> Result<Translation> {
    translate(&pattern::validate(pattern)?)
}

/// Translates a validated pattern into its canonical form.
///
/// # Errors
///
/// Returns `ConflictingFlags` if one part of the pattern enables a flag that
/// another part disables, and `InvalidSyntax` if the regex engine rejects
/// the rendered pattern.
pub fn translate(parsed: &ParsedPattern) -> Result<Translation> {
    let flags = resolve_flags(parsed)?;

    let mut body = String::new();
    render_alternation(&parsed.ast, parsed, &mut body)?;
    if body.is_empty() {
        return Err(Error::InvalidSyntax(format!(
            "pattern '{}' has an empty body",
            parsed.source
        )));
    }

    let canonical = if flags.is_empty() {
        body.clone()
    } else {
        format!("(?{}){}", flags, body)
    };

    compile(&canonical)?;

    log::debug!("Translated '{}' to '{}'", parsed.source, canonical);

    Ok(Translation {
        client_pattern: format!("/{}/{}", escape_slashes(&body), flags),
        canonical,
        group_count: parsed.group_count(),
        flags,
    })
}

/// Compiles a canonical pattern with the matching engine.
///
/// # Errors
///
/// Returns `InvalidSyntax` with the engine's message on failure.
pub fn compile(canonical: &str) -> Result<fancy_regex::Regex> {
    fancy_regex::Regex::new(canonical)
        .map_err(|e| Error::InvalidSyntax(format!("'{}': {}", canonical, e)))
}

fn resolve_flags(parsed: &ParsedPattern) -> Result<FlagSet> {
    let mut set = BTreeSet::new();
    for inline in &parsed.flags {
        let conflict = parsed
            .flags
            .iter()
            .find(|other| other.flag == inline.flag && other.enabled != inline.enabled);
        if let Some(other) = conflict {
            let (on, off) = if inline.enabled {
                (inline, other)
            } else {
                (other, inline)
            };
            return Err(Error::ConflictingFlags(format!(
                "'{}' is enabled at position {} and disabled at position {}",
                on.flag.letter(),
                on.position,
                off.position
            )));
        }
        if inline.enabled {
            set.insert(inline.flag);
        }
    }
    Ok(FlagSet(set))
}

fn render_alternation(alt: &Alternation, parsed: &ParsedPattern, out: &mut String) -> Result<()> {
    for (i, branch) in alt.0.iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        let mut previous_was_backref = false;
        for node in branch {
            let mut rendered = String::new();
            render_node(node, parsed, &mut rendered)?;
            // `\1` followed by a digit would read as `\1N`.
            if previous_was_backref && rendered.starts_with(|c: char| c.is_ascii_digit()) {
                wrap_last_backref(out);
            }
            previous_was_backref = matches!(node, Node::Backref(_));
            out.push_str(&rendered);
        }
    }
    Ok(())
}

fn wrap_last_backref(out: &mut String) {
    if let Some(start) = out.rfind('\\') {
        let backref = out.split_off(start);
        out.push_str("(?:");
        out.push_str(&backref);
        out.push(')');
    }
}

fn render_node(node: &Node, parsed: &ParsedPattern, out: &mut String) -> Result<()> {
    match node {
        Node::Literal(c) => {
            if matches!(c, '{' | '}' | ']') {
                out.push('\\');
            }
            out.push(*c);
        }
        Node::Escape(text) | Node::Class(text) => out.push_str(text),
        Node::Dot => out.push('.'),
        Node::Start => out.push('^'),
        Node::End => out.push('$'),
        Node::Group { kind, body } => {
            out.push_str(match kind {
                GroupType::Capture { .. } => "(",
                GroupType::NonCapture => "(?:",
                GroupType::Lookahead { negative: false } => "(?=",
                GroupType::Lookahead { negative: true } => "(?!",
            });
            render_alternation(body, parsed, out)?;
            out.push(')');
        }
        Node::Backref(reference) => {
            let index = match reference {
                Reference::Number(n) => *n,
                Reference::Name(name) => parsed.index_of(name).ok_or_else(|| {
                    Error::InvalidSyntax(format!("unknown group name '{}'", name))
                })?,
            };
            out.push_str(&format!("\\{}", index));
        }
        Node::Repeat { node, quantifier } => {
            render_node(node, parsed, out)?;
            out.push_str(quantifier);
        }
    }
    Ok(())
}

/// Escapes unescaped `/` so the body can sit inside a `/.../` literal.
fn escape_slashes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut escaped = false;
    for c in body.chars() {
        if c == '/' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}
