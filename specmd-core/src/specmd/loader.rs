//! Source loading
//!
//! The import resolver reads files through the [`SourceReader`] trait so that tests and
//! embedders can serve documents from memory.
//!
//! - [`FsReader`] reads from the file system.
//! - [`MemoryReader`] serves a fixed set of in-memory files.
//! - [`DocumentLoader`] loads and parses a single file without resolving its imports.
//!
//! # Example
//!
//! ```rust,ignore
//! use specmd_core::specmd::loader::DocumentLoader;
//!
//! let doc = DocumentLoader::from_string("# Spec\n\n# Intro\n\nHello.\n").parse()?;
//! assert_eq!(doc.title.as_deref(), Some("Spec"));
//! ```

use crate::specmd::ast::Document;
use crate::specmd::error::{ImportError, ImportErrorKind, ParseError};
use crate::specmd::imports::paths::normalize;
use crate::specmd::parsing::{DocumentParser, OutlineParser, StartContext};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads the source text of a document
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads documents from the file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Serves documents from memory, keyed by normalized path
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), source.into());
    }
}

impl SourceReader for MemoryReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(&normalize(path)).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }
}

/// Classify an io error from a reader as an import failure
pub(crate) fn read_error(err: &io::Error, path: &Path, chain: Vec<PathBuf>) -> ImportError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ImportErrorKind::Missing,
        _ => ImportErrorKind::Unreadable(err.to_string()),
    };
    ImportError::new(kind, path, chain)
}

/// Loads one document and parses it on its own
///
/// Imports are left in the tree as [`Import`](crate::specmd::ast::Import) nodes; use the
/// [`Compiler`](crate::specmd::pipeline::Compiler) to resolve them.
pub struct DocumentLoader {
    source: String,
    file: Option<PathBuf>,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let source = FsReader
            .read(path)
            .map_err(|err| read_error(&err, path, Vec::new()))?;
        Ok(DocumentLoader {
            source,
            file: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            file: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse as a top-level document with the outline reader
    pub fn parse(&self) -> Result<Document, ParseError> {
        self.parse_with(&OutlineParser::new(), StartContext::Initial)
    }

    pub fn parse_with(
        &self,
        parser: &dyn DocumentParser,
        start: StartContext,
    ) -> Result<Document, ParseError> {
        parser
            .parse(&self.source, start, self.file.as_deref())
            .map_err(|err| err.with_source(&self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_reader_normalizes_paths() {
        let reader = MemoryReader::new().with_file("docs/./a.md", "# A\n");
        assert_eq!(reader.read(Path::new("docs/sub/../a.md")).unwrap(), "# A\n");
        let err = reader.read(Path::new("b.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_error_classification() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(read_error(&missing, Path::new("a.md"), vec![]).kind, ImportErrorKind::Missing);
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            read_error(&denied, Path::new("a.md"), vec![]).kind,
            ImportErrorKind::Unreadable(_)
        ));
    }

    #[test]
    fn test_loader_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Spec\n\n# Intro\n").unwrap();
        let doc = DocumentLoader::from_path(file.path()).unwrap().parse().unwrap();
        assert_eq!(doc.title.as_deref(), Some("Spec"));
        assert_eq!(doc.iter_sections().count(), 1);
    }

    #[test]
    fn test_loader_missing_file() {
        let err = DocumentLoader::from_path("/definitely/not/here.md").err().unwrap();
        assert_eq!(err.kind, ImportErrorKind::Missing);
    }

    #[test]
    fn test_parse_error_carries_source_context() {
        let err = DocumentLoader::from_string("no title here\n").parse().unwrap_err();
        assert!(err.context.is_some());
    }
}
