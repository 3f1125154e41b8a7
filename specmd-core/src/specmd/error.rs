//! Error types for compilation
//!
//!     Every failure is fatal to the run. Each stage has its own error type; [CompileError]
//!     wraps them so the pipeline has a single error to propagate.
//!
//!     - [ParseError]: the reader rejected a file. Carries a `file:line:column` pointer and, once
//!       the source is attached, the offending lines with a caret under the column.
//!     - [ImportError]: an import could not be read, forms a cycle, or the run was cancelled.
//!     - [NumberingError]: an explicit numbering override breaks the sibling order.
//!     - [StructuralError]: the resolved document is not fit for annotation.

use crate::specmd::ast::Span;
use std::fmt;
use std::path::{Path, PathBuf};

fn write_chain(f: &mut fmt::Formatter<'_>, chain: &[PathBuf]) -> fmt::Result {
    for importer in chain.iter().rev() {
        write!(f, "\n  imported from {}", importer.display())?;
    }
    Ok(())
}

/// Error reported by a [DocumentParser](crate::specmd::parsing::DocumentParser)
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub file: Option<PathBuf>,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub message: String,
    /// Source lines around the error, see [format_source_context]
    pub context: Option<String>,
    /// Files whose imports led to this one, outermost first
    pub import_chain: Vec<PathBuf>,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: None,
            line,
            column,
            message: message.into(),
            context: None,
            import_chain: Vec::new(),
        }
    }

    pub fn in_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Attach the offending source lines
    pub fn with_source(mut self, source: &str) -> Self {
        self.context = Some(format_source_context(source, self.line, self.column));
        self
    }

    pub fn with_chain(mut self, chain: Vec<PathBuf>) -> Self {
        self.import_chain = chain;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file.display())?;
        }
        write!(f, "{}:{}: {}", self.line, self.column, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n\n{}", context.trim_end())?;
        }
        write_chain(f, &self.import_chain)
    }
}

impl std::error::Error for ParseError {}

/// Format the line before the error, the error line and a caret under the column
///
/// Lines and columns are 1-based.
///
/// ```text
///      1 | # Title
///   >> 2 | ## Skipped
///          ^
/// ```
pub fn format_source_context(source: &str, line: usize, column: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    if line == 0 || line > lines.len() {
        return String::new();
    }

    let mut context = String::new();
    if line >= 2 {
        context.push_str(&format!("   {:3} | {}\n", line - 1, lines[line - 2]));
    }
    context.push_str(&format!(">> {:3} | {}\n", line, lines[line - 1]));
    context.push_str(&format!("{}^\n", " ".repeat(9 + column.saturating_sub(1))));
    context
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// The file does not exist
    Missing,
    /// The file exists but could not be read
    Unreadable(String),
    /// The file is already being resolved further up the chain
    Cycle,
    /// The run was cancelled before the file was read
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    pub kind: ImportErrorKind,
    pub path: PathBuf,
    /// Files whose imports led to `path`, outermost first
    pub chain: Vec<PathBuf>,
    /// Location of the import in the importing file
    pub span: Option<Span>,
}

impl ImportError {
    pub fn new(kind: ImportErrorKind, path: impl Into<PathBuf>, chain: Vec<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            chain,
            span: None,
        }
    }

    pub fn at(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}: ", span)?;
        }
        let path = self.path.display();
        match &self.kind {
            ImportErrorKind::Missing => write!(f, "Cannot import {}: file not found", path)?,
            ImportErrorKind::Unreadable(reason) => {
                write!(f, "Cannot import {}: {}", path, reason)?
            }
            ImportErrorKind::Cycle => write!(f, "Cannot import {}: import cycle", path)?,
            ImportErrorKind::Cancelled => {
                write!(f, "Import of {} cancelled", path)?
            }
        }
        write_chain(f, &self.chain)
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingErrorKind {
    /// `*` overrides are reserved
    Unsupported,
    /// A numeric override following a lettered sibling
    LetterToNumber,
    /// A lettered override following a numbered sibling that does not start at `A`
    NumberToLetter,
    /// An override at or before the next expected value
    NotIncreasing,
    /// A number that does not fit in a section id part
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberingError {
    pub kind: NumberingErrorKind,
    /// The override as written
    pub found: String,
    /// The previous sibling's part, when there is one
    pub previous: Option<String>,
    /// The value auto-numbering would have produced
    pub expected: Option<String>,
    /// Title of the offending section
    pub title: String,
    pub span: Option<Span>,
}

impl fmt::Display for NumberingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}: ", span)?;
        }
        let previous = self.previous.as_deref().unwrap_or("?");
        let expected = self.expected.as_deref().unwrap_or("?");
        match self.kind {
            NumberingErrorKind::Unsupported => {
                write!(f, "Section numbering '{}' is not yet supported", self.found)?
            }
            NumberingErrorKind::LetterToNumber => write!(
                f,
                "Cannot change to numbered section {} after lettered section {}",
                self.found, previous
            )?,
            NumberingErrorKind::NumberToLetter => write!(
                f,
                "Cannot change to lettered section {} after numbered section {}, lettered sections start at A",
                self.found, previous
            )?,
            NumberingErrorKind::NotIncreasing => write!(
                f,
                "Cannot change to section number {} which would be earlier than {}",
                self.found, expected
            )?,
            NumberingErrorKind::OutOfRange if self.found.is_empty() => write!(
                f,
                "Cannot number the section after {}, the number is out of range",
                previous
            )?,
            NumberingErrorKind::OutOfRange => {
                write!(f, "Section number {} is out of range", self.found)?
            }
        }
        write!(f, " (in section \"{}\")", self.title)
    }
}

impl std::error::Error for NumberingError {}

#[derive(Debug, Clone, PartialEq)]
pub enum StructuralError {
    /// A top-level document has no title
    MissingTitle,
    /// An import survived resolution
    UnresolvedImport { path: String, span: Option<Span> },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::MissingTitle => write!(f, "Document must begin with a # Title"),
            StructuralError::UnresolvedImport { path, span } => {
                if let Some(span) = span {
                    write!(f, "{}: ", span)?;
                }
                write!(f, "Unresolved import of {}", path)
            }
        }
    }
}

impl std::error::Error for StructuralError {}

/// Any failure of a compilation run
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Parse(ParseError),
    Import(ImportError),
    Numbering(NumberingError),
    Structural(StructuralError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "Parse error: {}", e),
            CompileError::Import(e) => write!(f, "Import error: {}", e),
            CompileError::Numbering(e) => write!(f, "Numbering error: {}", e),
            CompileError::Structural(e) => write!(f, "Invalid document: {}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(e) => Some(e),
            CompileError::Import(e) => Some(e),
            CompileError::Numbering(e) => Some(e),
            CompileError::Structural(e) => Some(e),
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<ImportError> for CompileError {
    fn from(e: ImportError) -> Self {
        CompileError::Import(e)
    }
}

impl From<NumberingError> for CompileError {
    fn from(e: NumberingError) -> Self {
        CompileError::Numbering(e)
    }
}

impl From<StructuralError> for CompileError {
    fn from(e: StructuralError) -> Self {
        CompileError::Structural(e)
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
