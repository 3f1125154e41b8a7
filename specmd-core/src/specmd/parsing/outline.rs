//! Line-oriented outline reader
//!
//!     Reads one block at a time. A block starts at a non-blank line and its kind is decided
//!     by that line:
//!
//!         # Title / ## Title          section at the depth of the `#` run
//!         # 3.2 Title / # A. Title    section with a numbering override
//!         # [Title](path.md)          import
//!         **Title**                   subsection, up to the next heading or subsection
//!         ```lang example             code block; `example` / `counter-example` flags
//!         Name(a, b) :                algorithm, steps on the following list lines
//!         Name :                      production, alternatives on `  - ` lines
//!         Name :: one of              one-of production, rows on indented lines
//!         - item / * item / 1. item   list
//!         :: text with *Term*         definition paragraph, the first italic is the term
//!         Note: / TODO:               note / todo paragraph
//!         anything else               paragraph, up to a blank line or another block
//!
//!     Headings may go at most one level deeper than the enclosing section. In the initial
//!     context the first non-blank line must be the `# Title` heading.

use crate::specmd::ast::{
    plain_text, Algorithm, Call, Code, DefinitionParagraph, DefinitionTerm, Document, Import,
    List, ListItem, Node, NonTerminal, Note, OneOfProduction, Paragraph, Production, Rhs,
    Section, Span, Subsection, Terminal, Todo,
};
use crate::specmd::error::ParseError;
use crate::specmd::parsing::inline::parse_inlines;
use crate::specmd::parsing::{DocumentParser, StartContext};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("outline pattern is valid")
}

static HEADING: Lazy<Regex> = Lazy::new(|| pattern(r"^(#{1,6})\s+(.*?)\s*$"));
static IMPORT: Lazy<Regex> = Lazy::new(|| pattern(r"^\[(.*)\]\(([^)]+)\)$"));
static OVERRIDE: Lazy<Regex> =
    Lazy::new(|| pattern(r"^([0-9A-Z*]+(?:\.[0-9A-Z*]+)*)(\.?)\s+(\S.*)$"));
static FENCE: Lazy<Regex> = Lazy::new(|| pattern(r"^```\s*(.*?)\s*$"));
static SUBSECTION: Lazy<Regex> = Lazy::new(|| pattern(r"^\*\*([^*]+)\*\*\s*$"));
static ALGORITHM: Lazy<Regex> =
    Lazy::new(|| pattern(r"^([A-Za-z_]\w*)\(([^)]*)\)\s*:\s*$"));
static PRODUCTION: Lazy<Regex> =
    Lazy::new(|| pattern(r"^([A-Z][A-Za-z0-9_]*)\s+(:{1,3})(?:\s+(.*?))?\s*$"));
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"^\s*([-*]|\d+\.)\s+(.*)$"));
static ALTERNATIVE: Lazy<Regex> = Lazy::new(|| pattern(r"^\s+-\s+(.*)$"));
static NOTE: Lazy<Regex> = Lazy::new(|| pattern(r"^(Note|TODO):\s*(.*)$"));
static NON_TERMINAL: Lazy<Regex> = Lazy::new(|| pattern(r"^[A-Z][A-Za-z0-9_]*$"));

/// The reference reader for the outline subset of the dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineParser;

impl OutlineParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for OutlineParser {
    fn parse(
        &self,
        source: &str,
        start: StartContext,
        file: Option<&Path>,
    ) -> Result<Document, ParseError> {
        OutlineReader::new(source, start, file).read()
    }
}

struct OpenSection {
    depth: usize,
    section: Section,
}

struct OutlineReader<'s> {
    lines: Vec<&'s str>,
    /// Index of the next unread line
    pos: usize,
    start: StartContext,
    file: Option<PathBuf>,
    title: Option<String>,
    root: Vec<Node>,
    sections: Vec<OpenSection>,
    subsection: Option<Subsection>,
}

impl<'s> OutlineReader<'s> {
    fn new(source: &'s str, start: StartContext, file: Option<&Path>) -> Self {
        Self {
            lines: source.lines().collect(),
            pos: 0,
            start,
            file: file.map(Path::to_path_buf),
            title: None,
            root: Vec::new(),
            sections: Vec::new(),
            subsection: None,
        }
    }

    fn error(&self, index: usize, column: usize, message: impl Into<String>) -> ParseError {
        let err = ParseError::new(index + 1, column, message);
        match &self.file {
            Some(file) => err.in_file(file),
            None => err,
        }
    }

    /// Span over the lines `first..=last` (0-based indices)
    fn span(&self, first: usize, last: usize) -> Span {
        let last_len = self.lines.get(last).map_or(0, |l| l.chars().count());
        let span = Span::lines(first + 1, last + 1, last_len);
        match &self.file {
            Some(file) => span.in_file(file),
            None => span,
        }
    }

    fn read(mut self) -> Result<Document, ParseError> {
        if self.start == StartContext::Initial {
            self.read_title()?;
        }

        while self.pos < self.lines.len() {
            let index = self.pos;
            let line = self.lines[index];

            if line.trim().is_empty() {
                self.pos += 1;
            } else if let Some(caps) = HEADING.captures(line) {
                self.heading(index, caps[1].len(), &caps[2])?;
                self.pos += 1;
            } else if let Some(caps) = FENCE.captures(line) {
                let node = self.code_block(index, &caps[1])?;
                self.push(node);
            } else if let Some(caps) = SUBSECTION.captures(line) {
                self.close_subsection();
                self.subsection = Some(Subsection::new(caps[1].trim(), vec![]).at(self.span(index, index)));
                self.pos += 1;
            } else if let Some(caps) = ALGORITHM.captures(line) {
                let node = self.algorithm(index, &caps[1], &caps[2]);
                self.push(node);
            } else if let Some(caps) = PRODUCTION.captures(line) {
                let rest = caps.get(3).map_or("", |m| m.as_str());
                let node = self.production(index, &caps[1], caps[2].len(), rest);
                self.push(node);
            } else if let Some(caps) = LIST_ITEM.captures(line) {
                let ordered = caps[1].ends_with('.');
                let node = self.list(index, ordered);
                self.push(node);
            } else if let Some(rest) = line.strip_prefix("::") {
                let (text, last) = self.paragraph_text(index, rest);
                let node = definition_paragraph(&text).at(self.span(index, last));
                self.push(node.into());
            } else if let Some(caps) = NOTE.captures(line) {
                let (text, last) = self.paragraph_text(index, &caps[2]);
                let contents: Vec<Node> = vec![Paragraph::new(parse_inlines(&text)).into()];
                let span = Some(self.span(index, last));
                let node: Node = if &caps[1] == "Note" {
                    Note { span, ..Note::new(contents) }.into()
                } else {
                    Todo { span, ..Todo::new(contents) }.into()
                };
                self.push(node);
            } else {
                let (text, last) = self.paragraph_text(index, line);
                let span = Some(self.span(index, last));
                self.push(Paragraph { span, ..Paragraph::new(parse_inlines(&text)) }.into());
            }
        }

        self.finish()
    }

    fn read_title(&mut self) -> Result<(), ParseError> {
        while self.pos < self.lines.len() && self.lines[self.pos].trim().is_empty() {
            self.pos += 1;
        }
        let Some(&line) = self.lines.get(self.pos) else {
            return Err(self.error(0, 1, "Document must begin with a # Title"));
        };
        match HEADING.captures(line) {
            Some(caps) if caps[1].len() == 1 && !caps[2].is_empty() && !IMPORT.is_match(&caps[2]) => {
                self.title = Some(caps[2].to_string());
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(self.pos, 1, "Document must begin with a # Title")),
        }
    }

    fn heading(&mut self, index: usize, depth: usize, text: &str) -> Result<(), ParseError> {
        self.close_subsection();
        while self.sections.last().is_some_and(|open| open.depth >= depth) {
            self.close_section();
        }

        let deepest = match (self.sections.last(), self.start) {
            (Some(open), _) => open.depth + 1,
            (None, StartContext::Initial) => 1,
            (None, StartContext::Imported) => usize::MAX,
        };
        if depth > deepest {
            return Err(self.error(
                index,
                1,
                format!(
                    "Heading level skipped: found {} '#' where at most {} were expected",
                    depth, deepest
                ),
            ));
        }

        let span = self.span(index, index);
        if let Some(caps) = IMPORT.captures(text) {
            self.push(Import::new(&caps[2]).at(span).into());
            return Ok(());
        }

        let section = match OVERRIDE.captures(text) {
            Some(caps) if caps[1].contains('.') || !caps[2].is_empty() => {
                Section::new(&caps[3], vec![]).with_override(&caps[1])
            }
            _ => Section::new(text, vec![]),
        };
        self.sections.push(OpenSection {
            depth,
            section: section.at(span),
        });
        Ok(())
    }

    fn code_block(&mut self, index: usize, info: &str) -> Result<Node, ParseError> {
        let close = (index + 1..self.lines.len())
            .find(|&i| self.lines[i].trim() == "```")
            .ok_or_else(|| self.error(index, 1, "Unterminated code block"))?;

        let mut lang = None;
        let mut example = false;
        let mut counter = false;
        for word in info.split_whitespace() {
            match word {
                "example" => example = true,
                "counter-example" => {
                    example = true;
                    counter = true;
                }
                other if lang.is_none() => lang = Some(other.to_string()),
                _ => {}
            }
        }

        let code = self.lines[index + 1..close].join("\n");
        self.pos = close + 1;
        Ok(Code {
            example,
            counter,
            span: Some(self.span(index, close)),
            ..Code::new(lang, code)
        }
        .into())
    }

    fn algorithm(&mut self, index: usize, name: &str, args: &str) -> Node {
        let args = args
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect();
        let mut steps: Vec<Node> = Vec::new();
        let mut last = index;
        while let Some(caps) = self.lines.get(last + 1).and_then(|l| LIST_ITEM.captures(l)) {
            last += 1;
            steps.push(ListItem { span: Some(self.span(last, last)), ..ListItem::new(parse_inlines(&caps[2])) }.into());
        }
        self.pos = last + 1;
        Algorithm {
            span: Some(self.span(index, last)),
            ..Algorithm::new(Call::new(name, args), steps)
        }
        .into()
    }

    fn production(&mut self, index: usize, name: &str, def_type: usize, rest: &str) -> Node {
        let def_type = def_type as u8;
        let mut last = index;

        if rest == "one of" {
            let mut rows: Vec<Node> = Vec::new();
            while let Some(line) = self.lines.get(last + 1) {
                if line.trim().is_empty() || !line.starts_with(char::is_whitespace) {
                    break;
                }
                last += 1;
                let tokens = line.split_whitespace().map(|t| Node::from(Terminal::new(t))).collect();
                rows.push(Rhs::new(tokens).into());
            }
            self.pos = last + 1;
            return OneOfProduction {
                span: Some(self.span(index, last)),
                ..OneOfProduction::new(def_type, NonTerminal::new(name), rows)
            }
            .into();
        }

        let mut rhs: Vec<Node> = Vec::new();
        if !rest.is_empty() {
            rhs.push(Rhs::new(symbols(rest)).into());
        }
        while let Some(caps) = self.lines.get(last + 1).and_then(|l| ALTERNATIVE.captures(l)) {
            last += 1;
            rhs.push(Rhs::new(symbols(&caps[1])).into());
        }
        self.pos = last + 1;
        Production {
            span: Some(self.span(index, last)),
            ..Production::new(def_type, NonTerminal::new(name), rhs)
        }
        .into()
    }

    fn list(&mut self, index: usize, ordered: bool) -> Node {
        let mut items: Vec<(String, usize, usize)> = Vec::new();
        let mut i = index;
        while let Some(line) = self.lines.get(i) {
            if let Some(caps) = LIST_ITEM.captures(line) {
                items.push((caps[2].to_string(), i, i));
            } else if !line.trim().is_empty() && line.starts_with(char::is_whitespace) {
                match items.last_mut() {
                    Some((text, _, end)) => {
                        text.push(' ');
                        text.push_str(line.trim());
                        *end = i;
                    }
                    None => break,
                }
            } else {
                break;
            }
            i += 1;
        }
        self.pos = i;
        let last = i.saturating_sub(1).max(index);
        let items: Vec<Node> = items
            .into_iter()
            .map(|(text, first, end)| {
                ListItem {
                    span: Some(self.span(first, end)),
                    ..ListItem::new(parse_inlines(&text))
                }
                .into()
            })
            .collect();
        List {
            span: Some(self.span(index, last)),
            ..List::new(ordered, items)
        }
        .into()
    }

    /// Join the lines of a paragraph starting at `index`, whose first line reads `first`
    ///
    /// Returns the text and the index of the last line.
    fn paragraph_text(&mut self, index: usize, first: &str) -> (String, usize) {
        let mut text = first.trim().to_string();
        let mut last = index;
        while let Some(line) = self.lines.get(last + 1) {
            if line.trim().is_empty() || starts_block(line) {
                break;
            }
            last += 1;
            text.push(' ');
            text.push_str(line.trim());
        }
        self.pos = last + 1;
        (text, last)
    }

    fn push(&mut self, node: Node) {
        if let Some(subsection) = self.subsection.as_mut() {
            subsection.contents.push(node);
        } else {
            self.push_outside_subsection(node);
        }
    }

    fn push_outside_subsection(&mut self, node: Node) {
        match self.sections.last_mut() {
            Some(open) => open.section.contents.push(node),
            None => self.root.push(node),
        }
    }

    fn close_subsection(&mut self) {
        if let Some(subsection) = self.subsection.take() {
            self.push_outside_subsection(subsection.into());
        }
    }

    fn close_section(&mut self) {
        if let Some(open) = self.sections.pop() {
            self.push_outside_subsection(open.section.into());
        }
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        self.close_subsection();
        while !self.sections.is_empty() {
            self.close_section();
        }
        let span = if self.lines.is_empty() {
            None
        } else {
            Some(self.span(0, self.lines.len() - 1))
        };
        Ok(Document {
            title: self.title,
            contents: self.root,
            span,
        })
    }
}

fn starts_block(line: &str) -> bool {
    HEADING.is_match(line)
        || FENCE.is_match(line)
        || SUBSECTION.is_match(line)
        || ALGORITHM.is_match(line)
        || LIST_ITEM.is_match(line)
        || NOTE.is_match(line)
        || line.starts_with("::")
}

/// Grammar symbols of one right-hand side
fn symbols(text: &str) -> Vec<Node> {
    text.split_whitespace()
        .map(|token| {
            if NON_TERMINAL.is_match(token) {
                Node::from(NonTerminal::new(token))
            } else {
                let literal = token.trim_matches(|c| c == '"' || c == '`');
                let literal = if literal.is_empty() { token } else { literal };
                Node::from(Terminal::new(literal))
            }
        })
        .collect()
}

/// Build a definition paragraph, turning its first italic span into the defined term
fn definition_paragraph(text: &str) -> DefinitionParagraph {
    let mut contents = parse_inlines(text);
    if let Some(index) = contents.iter().position(|n| matches!(n, Node::Italic(_))) {
        if let Node::Italic(italic) = &contents[index] {
            let term = DefinitionTerm::new(plain_text(&italic.contents), italic.contents.clone());
            contents[index] = term.into();
        }
    }
    DefinitionParagraph::new(contents)
}
