//! Compilation entry point
//!
//!     The [Compiler] ties the stages together for a whole run:
//!
//!         path ──▶ ImportResolver (read + parse + splice) ──▶ annotate ──▶ Compiled
//!
//!     It owns a [SourceReader], a [DocumentParser] and the [CompileOptions] of the run. The
//!     Biblio is created fresh for each call, seeded from the external tables in the options,
//!     and returned frozen inside [Compiled].
//!
//!     Any error aborts the run. No partially annotated document is ever returned.

use crate::specmd::annotate::{annotate, AnchorOptions, AnnotateOptions};
use crate::specmd::ast::Document;
use crate::specmd::biblio::{Biblio, ExternalBiblio};
use crate::specmd::error::CompileResult;
use crate::specmd::imports::{CancelFlag, ImportResolver};
use crate::specmd::loader::{FsReader, MemoryReader, SourceReader};
use crate::specmd::parsing::{DocumentParser, OutlineParser};
use std::path::Path;

/// Options of one compilation run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub anchors: AnchorOptions,
    pub require_title: bool,
    /// Resolve sibling imports concurrently
    pub parallel_imports: bool,
    /// Reference tables of other specs, seeded into the Biblio before annotation
    pub external_biblio: ExternalBiblio,
    pub cancel: Option<CancelFlag>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            anchors: AnchorOptions::default(),
            require_title: true,
            parallel_imports: true,
            external_biblio: ExternalBiblio::new(),
            cancel: None,
        }
    }
}

impl CompileOptions {
    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            anchors: self.anchors.clone(),
            require_title: self.require_title,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub document: Document,
    pub biblio: Biblio,
}

pub struct Compiler<R = FsReader, P = OutlineParser> {
    reader: R,
    parser: P,
    options: CompileOptions,
}

impl Compiler {
    /// File system reader, outline parser, default options
    pub fn new() -> Self {
        Self {
            reader: FsReader,
            parser: OutlineParser::new(),
            options: CompileOptions::default(),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> Compiler<R, P>
where
    R: SourceReader,
    P: DocumentParser,
{
    pub fn with_reader<R2: SourceReader>(self, reader: R2) -> Compiler<R2, P> {
        Compiler {
            reader,
            parser: self.parser,
            options: self.options,
        }
    }

    pub fn with_parser<P2: DocumentParser>(self, parser: P2) -> Compiler<R, P2> {
        Compiler {
            reader: self.reader,
            parser,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile the document at `path` and everything it imports
    pub fn compile(&self, path: impl AsRef<Path>) -> CompileResult<Compiled> {
        self.compile_with(&self.reader, path.as_ref())
    }

    /// Compile a single in-memory document named `name`
    ///
    /// The name is used for error locations. Imports resolve against the other documents of
    /// the run, so in practice a source with imports fails with a missing import.
    pub fn compile_source(&self, name: impl AsRef<Path>, source: &str) -> CompileResult<Compiled> {
        let name = name.as_ref();
        let reader = MemoryReader::new().with_file(name, source);
        self.compile_with(&reader, name)
    }

    fn compile_with(&self, reader: &dyn SourceReader, path: &Path) -> CompileResult<Compiled> {
        let mut resolver =
            ImportResolver::new(reader, &self.parser).parallel(self.options.parallel_imports);
        if let Some(cancel) = &self.options.cancel {
            resolver = resolver.with_cancel(cancel.clone());
        }
        let document = resolver.resolve(path)?;
        tracing::debug!(file = %path.display(), "resolved imports");

        let biblio = Biblio::seeded(&self.options.external_biblio);
        let annotated = annotate(document, biblio, &self.options.annotate_options())?;
        tracing::debug!(
            file = %path.display(),
            anchors = annotated.biblio.len(),
            "compiled document"
        );
        Ok(Compiled {
            document: annotated.document,
            biblio: annotated.biblio,
        })
    }
}
