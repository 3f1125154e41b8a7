//! Import resolution
//!
//!     Builds one logical document out of a tree of files. The top-level file is parsed with
//!     the initial start context; every file reached through an import is parsed with the
//!     imported context, which does not require a title.
//!
//!     For each file, the imports are collected in document order and resolved recursively.
//!     Sibling imports are independent, so they may be resolved in parallel; their results are
//!     still spliced strictly in declaration order, and when several fail the first one in
//!     declaration order is reported.
//!
//!         index.md            # Spec
//!           # [Overview](Section 1 -- Overview.md)
//!           # [Types](Section 2 -- Types.md)
//!
//!     Any failure aborts the whole resolution. Errors carry the chain of files that led to
//!     the failing one. A file that imports itself, directly or through others, is an
//!     [ImportErrorKind::Cycle] error.
//!
//! ## Modules
//!
//! - `paths` - decoding, joining and normalizing import paths
//! - `splice` - replacing resolved imports with their contents

pub mod paths;
pub mod splice;

pub use paths::{decode_import_path, normalize, resolve_import_path};
pub use splice::splice_imports;

use crate::specmd::ast::{Document, Node, Span};
use crate::specmd::error::{CompileError, CompileResult, ImportError, ImportErrorKind};
use crate::specmd::loader::{read_error, SourceReader};
use crate::specmd::parsing::{DocumentParser, StartContext};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag to stop a resolution between files
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct ImportResolver<'a> {
    reader: &'a dyn SourceReader,
    parser: &'a dyn DocumentParser,
    parallel: bool,
    cancel: Option<CancelFlag>,
}

impl<'a> ImportResolver<'a> {
    pub fn new(reader: &'a dyn SourceReader, parser: &'a dyn DocumentParser) -> Self {
        Self {
            reader,
            parser,
            parallel: true,
            cancel: None,
        }
    }

    /// Resolve sibling imports on the rayon thread pool (on by default)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Parse `path` and everything it imports into a single document without imports
    pub fn resolve(&self, path: &Path) -> CompileResult<Document> {
        let path = normalize(path);
        self.resolve_file(&path, StartContext::Initial, &[])
    }

    fn resolve_file(
        &self,
        path: &Path,
        start: StartContext,
        chain: &[PathBuf],
    ) -> CompileResult<Document> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(ImportError::new(ImportErrorKind::Cancelled, path, chain.to_vec()).into());
        }
        if chain.iter().any(|seen| seen == path) {
            return Err(ImportError::new(ImportErrorKind::Cycle, path, chain.to_vec()).into());
        }

        let source = self
            .reader
            .read(path)
            .map_err(|err| read_error(&err, path, chain.to_vec()))?;
        let document = self.parser.parse(&source, start, Some(path)).map_err(|err| {
            let err = if err.file.is_none() { err.in_file(path) } else { err };
            err.with_source(&source).with_chain(chain.to_vec())
        })?;
        tracing::debug!(file = %path.display(), depth = chain.len(), "parsed document");

        let imports = collect_imports(&document);
        if imports.is_empty() {
            return Ok(document);
        }

        let mut inner_chain = chain.to_vec();
        inner_chain.push(path.to_path_buf());
        let resolve_one = |(raw, span): &(String, Option<Span>)| -> CompileResult<Document> {
            let target = resolve_import_path(path, raw);
            self.resolve_file(&target, StartContext::Imported, &inner_chain)
                .map_err(|err| locate(err, &target, span))
        };

        let results: Vec<CompileResult<Document>> = if self.parallel && imports.len() > 1 {
            imports.par_iter().map(resolve_one).collect()
        } else {
            imports.iter().map(resolve_one).collect()
        };
        let resolved = results.into_iter().collect::<CompileResult<Vec<_>>>()?;

        Ok(splice_imports(document, resolved))
    }
}

/// Imports of a document in the order they appear
fn collect_imports(document: &Document) -> Vec<(String, Option<Span>)> {
    document
        .descendants()
        .filter_map(|node| match node {
            Node::Import(import) => Some((import.path.clone(), import.span.clone())),
            _ => None,
        })
        .collect()
}

/// Point an import failure at the import that caused it
fn locate(err: CompileError, target: &Path, span: &Option<Span>) -> CompileError {
    match err {
        CompileError::Import(import) if import.span.is_none() && import.path == target => {
            CompileError::Import(import.at(span.clone()))
        }
        other => other,
    }
}
