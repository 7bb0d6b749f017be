// Rust guideline compliant 2026-02-06

//! Pattern parsing and validation.
//!
//! Linkifier patterns are written in a Python-flavoured regex syntax but must
//! stay inside the subset that the client-side (JavaScript) dialect can run.
//! This module parses a pattern into an explicit syntax tree, rejecting
//! anything outside that subset, and records the capture group structure and
//! inline flags for the translator.

use crate::{Error, Result};
use std::collections::HashMap;

/// How a capture group was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// `(?P<name>...)` or `(?<name>...)`.
    Named(String),
    /// Plain `(...)`.
    Positional,
}

/// A capture group in left-to-right order of its opening parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// 1-based positional index.
    pub index: usize,
    /// Declaration style.
    pub kind: GroupKind,
}

impl GroupInfo {
    /// Returns the group name, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            GroupKind::Named(name) => Some(name),
            GroupKind::Positional => None,
        }
    }
}

/// A whole-pattern flag supported by both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// `i`
    CaseInsensitive,
    /// `m`
    MultiLine,
    /// `s`
    DotAll,
}

impl Flag {
    /// The flag letter shared by both dialects.
    pub fn letter(self) -> char {
        match self {
            Flag::CaseInsensitive => 'i',
            Flag::MultiLine => 'm',
            Flag::DotAll => 's',
        }
    }
}

/// An inline flag setting found while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineFlag {
    pub flag: Flag,
    /// `false` for `(?-i:...)`.
    pub enabled: bool,
    /// `true` for `(?i:...)`, `false` for a global `(?i)`.
    pub scoped: bool,
    /// Character offset of the flag group in the source.
    pub position: usize,
}

/// Reference target of a backreference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Number(usize),
    Name(String),
}

/// Group flavours that survive translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupType {
    Capture { index: usize, name: Option<String> },
    NonCapture,
    Lookahead { negative: bool },
}

/// A node of the pattern syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single unescaped character.
    Literal(char),
    /// An escape sequence, kept verbatim (e.g. `\d`, `\x41`, `\.`).
    Escape(String),
    /// A bracketed character class, normalized for both dialects.
    Class(String),
    Dot,
    Start,
    End,
    Group { kind: GroupType, body: Alternation },
    Backref(Reference),
    Repeat { node: Box<Node>, quantifier: String },
}

/// Alternatives separated by `|`; each branch is a sequence of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alternation(pub Vec<Vec<Node>>);

/// A successfully validated pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    /// The pattern as submitted.
    pub source: String,
    /// Syntax tree of the pattern body.
    pub ast: Alternation,
    /// Capture groups in order of appearance.
    pub groups: Vec<GroupInfo>,
    /// Inline flags in order of appearance.
    pub flags: Vec<InlineFlag>,
}

impl ParsedPattern {
    /// Number of capture groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Looks up the positional index of a named group.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.name() == Some(name))
            .map(|g| g.index)
    }
}

/// Parses and validates a pattern.
///
/// # Errors
///
/// Returns `InvalidSyntax` if the pattern does not parse, and
/// `UnsupportedConstruct` if it uses a construct the client-side dialect
/// has no equivalent for.
pub fn validate(pattern: &str) -> Result<ParsedPattern> {
    if pattern.is_empty() {
        return Err(Error::InvalidSyntax("pattern cannot be empty".to_string()));
    }

    let mut parser = Parser::new(pattern);
    let ast = parser.parse_alternation()?;
    if let Some(c) = parser.peek() {
        // Only an unmatched ')' can stop the top-level alternation early.
        return Err(parser.syntax(format!("unbalanced parenthesis '{}'", c)));
    }

    log::debug!(
        "Parsed pattern '{}' with {} group(s)",
        pattern,
        parser.groups.len()
    );

    Ok(ParsedPattern {
        source: pattern.to_string(),
        ast,
        groups: parser.groups,
        flags: parser.flags,
    })
}

/// Characters that keep their backslash outside a character class.
const META: &str = "\\.+*?()|[]{}^$";

/// Characters that keep their backslash inside a character class.
const CLASS_META: &str = "\\]^-[&~";

struct Parser {
    chars: Vec<char>,
    pos: usize,
    groups: Vec<GroupInfo>,
    names: HashMap<String, usize>,
    open_groups: Vec<usize>,
    flags: Vec<InlineFlag>,
    seen_content: bool,
}

impl Parser {
    fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            groups: Vec::new(),
            names: HashMap::new(),
            open_groups: Vec::new(),
            flags: Vec::new(),
            seen_content: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn syntax(&self, message: impl Into<String>) -> Error {
        Error::InvalidSyntax(format!("{} at position {}", message.into(), self.pos))
    }

    fn unsupported(&self, message: impl Into<String>) -> Error {
        Error::UnsupportedConstruct(format!("{} at position {}", message.into(), self.pos))
    }

    fn parse_alternation(&mut self) -> Result<Alternation> {
        let mut branches = vec![self.parse_sequence()?];
        while self.eat('|') {
            self.seen_content = true;
            branches.push(self.parse_sequence()?);
        }
        Ok(Alternation(branches))
    }

    fn parse_sequence(&mut self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            if matches!(c, '*' | '+' | '?') || self.brace_quantifier_len().is_some() {
                return Err(self.syntax("nothing to repeat"));
            }
            let Some(atom) = self.parse_atom()? else {
                continue;
            };
            self.seen_content = true;
            let node = self.parse_quantifier(atom)?;
            nodes.push(node);
        }
        Ok(nodes)
    }

    /// Parses one atom. Returns `None` for constructs that vanish from the
    /// tree (comments and global flag groups).
    fn parse_atom(&mut self) -> Result<Option<Node>> {
        let Some(c) = self.next() else {
            return Err(self.syntax("unexpected end of pattern"));
        };
        let node = match c {
            '(' => return self.parse_group(),
            '[' => Node::Class(self.parse_class()?),
            '\\' => self.parse_escape()?,
            '.' => Node::Dot,
            '^' => Node::Start,
            '$' => Node::End,
            other => Node::Literal(other),
        };
        Ok(Some(node))
    }

    fn parse_quantifier(&mut self, atom: Node) -> Result<Node> {
        let Some(quantifier) = self.read_quantifier()? else {
            return Ok(atom);
        };
        if matches!(atom, Node::Start | Node::End) {
            return Err(self.syntax("nothing to repeat"));
        }
        if self.read_quantifier()?.is_some() {
            return Err(self.syntax("multiple repeat"));
        }
        Ok(Node::Repeat {
            node: Box::new(atom),
            quantifier,
        })
    }

    /// Reads `*`, `+`, `?` or `{m,n}` plus an optional lazy suffix.
    fn read_quantifier(&mut self) -> Result<Option<String>> {
        let mut quantifier = match self.peek() {
            Some(c @ ('*' | '+' | '?')) => {
                self.pos += 1;
                c.to_string()
            }
            Some('{') => match self.brace_quantifier_len() {
                Some(len) => {
                    let text: String = self.chars[self.pos..self.pos + len].iter().collect();
                    self.pos += len;
                    check_brace_bounds(&text).map_err(|e| self.syntax(e))?;
                    if text.starts_with("{,") {
                        return Err(self.unsupported("repeat with omitted minimum"));
                    }
                    text
                }
                None => return Ok(None),
            },
            _ => return Ok(None),
        };

        if self.eat('?') {
            quantifier.push('?');
        } else if self.peek() == Some('+') {
            return Err(self.unsupported("possessive quantifier"));
        }
        Ok(Some(quantifier))
    }

    /// Length of a well-formed `{m}`, `{m,}`, `{m,n}` or `{,n}` at the cursor.
    fn brace_quantifier_len(&self) -> Option<usize> {
        if self.peek() != Some('{') {
            return None;
        }
        let mut i = 1;
        let mut digits = 0;
        let mut comma = false;
        loop {
            match self.peek_at(i)? {
                '0'..='9' => digits += 1,
                ',' if !comma => comma = true,
                '}' if digits > 0 => return Some(i + 1),
                _ => return None,
            }
            i += 1;
        }
    }

    fn parse_group(&mut self) -> Result<Option<Node>> {
        let start = self.pos - 1;
        if !self.eat('?') {
            let index = self.open_capture(None)?;
            return self.finish_group(GroupType::Capture { index, name: None }, Some(index));
        }

        match self.peek() {
            Some(':') => {
                self.pos += 1;
                self.finish_group(GroupType::NonCapture, None)
            }
            Some('=') | Some('!') => {
                let negative = self.next() == Some('!');
                self.finish_group(GroupType::Lookahead { negative }, None)
            }
            Some('#') => {
                while let Some(c) = self.next() {
                    if c == ')' {
                        return Ok(None);
                    }
                }
                Err(self.syntax("missing ), unterminated comment"))
            }
            Some('P') if self.peek_at(1) == Some('=') => {
                self.pos += 2;
                let name = self.read_name(')')?;
                let index = self.resolve_name(&name)?;
                self.check_closed(index)?;
                Ok(Some(Node::Backref(Reference::Name(name))))
            }
            Some('P') if self.peek_at(1) == Some('<') => {
                self.pos += 2;
                self.named_group()
            }
            Some('<') if matches!(self.peek_at(1), Some('=') | Some('!')) => {
                Err(self.unsupported("lookbehind assertion"))
            }
            Some('<') => {
                self.pos += 1;
                self.named_group()
            }
            Some('(') => Err(self.unsupported("conditional group")),
            Some('>') => Err(self.unsupported("atomic group")),
            Some(c) if c == '-' || c.is_ascii_alphabetic() => self.flag_group(start),
            Some(c) => Err(self.syntax(format!("unknown extension ?{}", c))),
            None => Err(self.syntax("unexpected end of pattern")),
        }
    }

    fn named_group(&mut self) -> Result<Option<Node>> {
        let name = self.read_name('>')?;
        if self.names.contains_key(&name) {
            return Err(self.unsupported(format!("duplicate group name '{}'", name)));
        }
        let index = self.open_capture(Some(name.clone()))?;
        self.finish_group(
            GroupType::Capture {
                index,
                name: Some(name),
            },
            Some(index),
        )
    }

    fn open_capture(&mut self, name: Option<String>) -> Result<usize> {
        let index = self.groups.len() + 1;
        let kind = match name {
            Some(name) => {
                self.names.insert(name.clone(), index);
                GroupKind::Named(name)
            }
            None => GroupKind::Positional,
        };
        self.groups.push(GroupInfo { index, kind });
        Ok(index)
    }

    fn finish_group(&mut self, kind: GroupType, capture: Option<usize>) -> Result<Option<Node>> {
        if let Some(index) = capture {
            self.open_groups.push(index);
        }
        self.seen_content = true;
        let body = self.parse_alternation()?;
        if !self.eat(')') {
            return Err(self.syntax("missing ), unterminated subpattern"));
        }
        if capture.is_some() {
            self.open_groups.pop();
        }
        Ok(Some(Node::Group { kind, body }))
    }

    fn flag_group(&mut self, start: usize) -> Result<Option<Node>> {
        let mut on = Vec::new();
        let mut off = Vec::new();
        let mut negating = false;
        loop {
            let Some(c) = self.next() else {
                return Err(self.syntax("missing -, : or )"));
            };
            match c {
                '-' if !negating => negating = true,
                ')' | ':' => {
                    if negating && off.is_empty() {
                        return Err(self.syntax("missing flag after '-'"));
                    }
                    let scoped = c == ':';
                    if !scoped && negating {
                        return Err(self.syntax("global flags cannot be turned off"));
                    }
                    if !scoped && self.seen_content {
                        return Err(self.syntax("global flags not at the start of the expression"));
                    }
                    for (flags, enabled) in [(&on, true), (&off, false)] {
                        for &flag in flags {
                            self.flags.push(InlineFlag {
                                flag,
                                enabled,
                                scoped,
                                position: start,
                            });
                        }
                    }
                    if scoped {
                        return self.finish_group(GroupType::NonCapture, None);
                    }
                    return Ok(None);
                }
                'i' | 'm' | 's' => {
                    let flag = match c {
                        'i' => Flag::CaseInsensitive,
                        'm' => Flag::MultiLine,
                        _ => Flag::DotAll,
                    };
                    if negating {
                        off.push(flag);
                    } else {
                        on.push(flag);
                    }
                }
                'u' if !negating => {}
                'a' | 'L' | 'x' => {
                    return Err(self.unsupported(format!("inline flag '{}'", c)));
                }
                other => return Err(self.syntax(format!("unknown flag '{}'", other))),
            }
        }
    }

    fn read_name(&mut self, terminator: char) -> Result<String> {
        let mut name = String::new();
        loop {
            match self.next() {
                Some(c) if c == terminator => break,
                Some(c) => name.push(c),
                None => return Err(self.syntax("missing group name terminator")),
            }
        }
        let mut chars = name.chars();
        let valid = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
        if !valid {
            return Err(self.syntax(format!("bad character in group name '{}'", name)));
        }
        Ok(name)
    }

    fn resolve_name(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| self.syntax(format!("unknown group name '{}'", name)))
    }

    fn check_closed(&self, index: usize) -> Result<()> {
        if index > self.groups.len() {
            return Err(self.syntax(format!("invalid group reference {}", index)));
        }
        if self.open_groups.contains(&index) {
            return Err(self.syntax("cannot refer to an open group"));
        }
        Ok(())
    }

    fn parse_escape(&mut self) -> Result<Node> {
        let Some(c) = self.next() else {
            return Err(self.syntax("bad escape (end of pattern)"));
        };
        match c {
            '1'..='9' => {
                let mut number = c.to_digit(10).unwrap_or_default() as usize;
                if let Some(d) = self.peek().and_then(|d| d.to_digit(10)) {
                    self.pos += 1;
                    number = number * 10 + d as usize;
                }
                self.check_closed(number)?;
                Ok(Node::Backref(Reference::Number(number)))
            }
            '0' => {
                let mut text = String::from("\\0");
                while text.len() < 4 && matches!(self.peek(), Some('0'..='7')) {
                    text.push(self.next().unwrap_or('0'));
                }
                if text.len() > 2 {
                    return Err(self.unsupported("octal escape"));
                }
                Ok(Node::Escape(text))
            }
            'x' => self.hex_escape('x', 2),
            'u' => self.hex_escape('u', 4),
            'A' | 'Z' | 'z' | 'G' => Err(self.unsupported(format!("anchor \\{}", c))),
            'U' | 'N' => Err(self.unsupported(format!("escape \\{}", c))),
            'd' | 'D' | 'w' | 'W' | 's' | 'S' | 'b' | 'B' | 'n' | 't' | 'r' | 'f' | 'v' => {
                Ok(Node::Escape(format!("\\{}", c)))
            }
            c if c.is_ascii_alphanumeric() => Err(self.syntax(format!("bad escape \\{}", c))),
            c if META.contains(c) => Ok(Node::Escape(format!("\\{}", c))),
            // `\/`, `\<` and friends are plain literals in both dialects.
            c => Ok(Node::Literal(c)),
        }
    }

    fn hex_escape(&mut self, prefix: char, digits: usize) -> Result<Node> {
        let mut text = format!("\\{}", prefix);
        for _ in 0..digits {
            match self.next() {
                Some(d) if d.is_ascii_hexdigit() => text.push(d),
                _ => return Err(self.syntax(format!("incomplete escape \\{}", prefix))),
            }
        }
        Ok(Node::Escape(text))
    }

    /// Parses a character class body after `[` and returns its normalized text.
    ///
    /// A leading `]` is literal in the source dialect, while `[`, `&` and `~`
    /// carry set-operation meaning in the compiling engine; all four are
    /// emitted escaped.
    fn parse_class(&mut self) -> Result<String> {
        let mut out = String::from("[");
        if self.eat('^') {
            out.push('^');
        }
        let mut first = true;
        loop {
            let Some(c) = self.next() else {
                return Err(self.syntax("unterminated character set"));
            };
            match c {
                ']' if first => out.push_str("\\]"),
                ']' => break,
                '\\' => {
                    let Some(escaped) = self.next() else {
                        return Err(self.syntax("unterminated character set"));
                    };
                    match escaped {
                        'A' | 'Z' | 'z' | 'G' | 'U' | 'N' => {
                            return Err(self.unsupported(format!("escape \\{} in set", escaped)));
                        }
                        '1'..='9' => {
                            return Err(self.unsupported("octal escape in set"));
                        }
                        c if c.is_ascii_punctuation() && !CLASS_META.contains(c) => {
                            out.push(c);
                        }
                        _ => {
                            out.push('\\');
                            out.push(escaped);
                        }
                    }
                }
                '[' | '&' | '~' => {
                    out.push('\\');
                    out.push(c);
                }
                other => out.push(other),
            }
            first = false;
        }
        out.push(']');
        Ok(out)
    }
}

fn check_brace_bounds(text: &str) -> std::result::Result<(), String> {
    let inner = &text[1..text.len() - 1];
    let (min, max) = match inner.split_once(',') {
        Some((min, max)) => (min, max),
        None => (inner, inner),
    };
    let parse = |s: &str| -> std::result::Result<Option<u32>, String> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse::<u32>()
            .map(Some)
            .map_err(|_| format!("repeat count '{}' is too large", s))
    };
    if let (Some(min), Some(max)) = (parse(min)?, parse(max)?) {
        if min > max {
            return Err("min repeat greater than max repeat".to_string());
        }
    }
    Ok(())
}
