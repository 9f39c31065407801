//! Doc-comment parser — directive-driven line state machine.
//!
//! Each comment line has its leading `*` marker removed and is then either a
//! directive line (`@brief`, `@param`, `@return`, `@example`, `@note`,
//! `@since`, `@deprecated`, `@tag`) or free text. Free text goes to the
//! description buffer while in [`State::Description`] and to the example
//! buffer while in [`State::Example`]. Only `@example` changes state, and
//! nothing leads back to `Description`.
//!
//! The description buffer is committed once, when the first directive line is
//! seen (or at the end of the comment if there is none): its first line
//! becomes the brief unless one is already set, the whole buffer becomes the
//! description. Free text between later directives is discarded.
//!
//! Nothing here fails. A declaration without a `name(` yields `None`, an
//! unknown `@word` or a `@param` without a name and text is free text.

use crate::model::{ApiEntry, Direction, Param};
use regex::Regex;
use std::sync::LazyLock;

static RE_FUNC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*\(").unwrap());

// `@param name text` or `@param [name] text`
static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@param\s+(?:\[(\w+)\]|(\w+))\s+(.*)$").unwrap()
});

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Description,
    Example,
}

impl State {
    /// Transition taken after a directive line has been applied.
    fn after(self, directive: &Directive) -> State {
        match (self, directive) {
            (_, Directive::Example) => State::Example,
            (state, _) => state,
        }
    }
}

/// A recognized directive line.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    Brief(&'a str),
    Param(Param),
    Return(&'a str),
    Example,
    Note(&'a str),
    Since(&'a str),
    Deprecated,
    Tag(&'a str),
}

/// Recognize a directive line. `line` must already be stripped of its marker.
fn directive(line: &str) -> Option<Directive<'_>> {
    let rest = line.strip_prefix('@')?;
    let (keyword, text) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim()),
        None => (rest, ""),
    };

    let directive = match keyword {
        "brief" => Directive::Brief(text),
        "param" => Directive::Param(param(line)?),
        "return" => Directive::Return(text),
        "example" => Directive::Example,
        "note" => Directive::Note(text),
        "since" => Directive::Since(text),
        "deprecated" => Directive::Deprecated,
        "tag" => Directive::Tag(text),
        _ => return None,
    };
    Some(directive)
}

/// Parse `@param <name|[name]> <text>`; a bracketed name is in/out.
fn param(line: &str) -> Option<Param> {
    let caps = RE_PARAM.captures(line.trim_end())?;
    let (name, direction) = match (caps.get(1), caps.get(2)) {
        (Some(inout), _) => (inout.as_str(), Direction::InOut),
        (None, Some(input)) => (input.as_str(), Direction::In),
        (None, None) => return None,
    };
    Some(Param {
        name: name.to_string(),
        direction,
        description: caps[3].trim().to_string(),
    })
}

/// Declaration with surrounding whitespace and the trailing `{` / `;` removed.
pub fn clean_declaration(declaration: &str) -> &str {
    let decl = declaration.trim();
    let decl = decl.strip_suffix('{').map(str::trim_end).unwrap_or(decl);
    decl.strip_suffix(';').map(str::trim_end).unwrap_or(decl)
}

/// First identifier followed by `(` in a cleaned declaration.
pub fn function_name(declaration: &str) -> Option<&str> {
    RE_FUNC_NAME
        .captures(declaration)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Remove the leading `*` continuation marker and the single space after it.
/// Any further indentation is kept for example code.
fn strip_marker(line: &str) -> &str {
    let line = line.trim_start();
    let line = match line.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    };
    line.trim_end()
}

struct CommentParser {
    entry: ApiEntry,
    brief: Option<String>,
    state: State,
    committed: bool,
    text: Vec<String>,
    example: Vec<String>,
}

impl CommentParser {
    fn new(name: &str, signature: &str) -> Self {
        CommentParser {
            entry: ApiEntry {
                name: name.to_string(),
                signature: signature.to_string(),
                ..Default::default()
            },
            brief: None,
            state: State::Description,
            committed: false,
            text: Vec::new(),
            example: Vec::new(),
        }
    }

    fn line(&mut self, raw: &str) {
        let line = strip_marker(raw);
        let text = line.trim_start();

        if let Some(directive) = directive(text) {
            self.flush_description();
            self.state = self.state.after(&directive);
            self.apply(directive);
            return;
        }

        match self.state {
            State::Description => self.text.push(text.to_string()),
            State::Example => self.example.push(line.to_string()),
        }
    }

    fn apply(&mut self, directive: Directive<'_>) {
        let entry = &mut self.entry;
        match directive {
            Directive::Brief(text) => self.brief = Some(text.to_string()),
            Directive::Param(param) => entry.params.push(param),
            Directive::Return(text) => entry.return_description = text.to_string(),
            Directive::Example => {}
            Directive::Note(text) => entry.notes.push(text.to_string()),
            Directive::Since(text) => entry.since_version = text.to_string(),
            Directive::Deprecated => entry.deprecated = true,
            Directive::Tag(text) => entry.tags.push(text.to_string()),
        }
    }

    /// Commit pending free text as brief/description the first time; drop it
    /// afterwards.
    fn flush_description(&mut self) {
        let text = join_lines(&self.text);
        self.text.clear();
        if self.committed {
            return;
        }

        self.committed = true;
        if let Some(first) = text.lines().next() {
            if self.brief.is_none() {
                self.brief = Some(first.to_string());
            }
            self.entry.description = text;
        }
    }

    fn finish(mut self) -> ApiEntry {
        self.flush_description();
        self.entry.brief = self.brief.unwrap_or_default();
        self.entry.example = join_lines(&self.example);
        self.entry
    }
}

/// Join lines, dropping blank lines at both ends.
fn join_lines(lines: &[String]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Parse one comment block and its declaration.
///
/// Returns `None` when the declaration has no function name; the block is
/// then not an API.
pub fn parse(comment: &str, declaration: &str) -> Option<ApiEntry> {
    let signature = clean_declaration(declaration);
    let name = function_name(signature)?;

    let mut parser = CommentParser::new(name, signature);
    for line in comment.trim().lines() {
        parser.line(line);
    }
    Some(parser.finish())
}
