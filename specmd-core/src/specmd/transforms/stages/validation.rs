//! Structure check stage

use crate::specmd::annotate::{check_structure, Annotated};
use crate::specmd::error::CompileError;
use crate::specmd::transforms::Runnable;

/// Reject documents without a title or with leftover imports
pub struct CheckStructure {
    require_title: bool,
}

impl CheckStructure {
    pub fn new(require_title: bool) -> Self {
        Self { require_title }
    }
}

impl Default for CheckStructure {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Runnable<Annotated, Annotated> for CheckStructure {
    fn run(&self, input: Annotated) -> Result<Annotated, CompileError> {
        check_structure(&input.document, self.require_title)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specmd::ast::{Document, Import};
    use crate::specmd::biblio::Biblio;
    use crate::specmd::error::StructuralError;

    #[test]
    fn test_untitled_allowed_when_not_required() {
        let input = Annotated::new(Document::untitled(vec![]), Biblio::new());
        assert!(CheckStructure::new(false).run(input.clone()).is_ok());
        assert_eq!(
            CheckStructure::default().run(input),
            Err(CompileError::Structural(StructuralError::MissingTitle))
        );
    }

    #[test]
    fn test_leftover_import_rejected() {
        let input = Annotated::new(
            Document::new("Spec", vec![Import::new("x.md").into()]),
            Biblio::new(),
        );
        assert!(matches!(
            CheckStructure::default().run(input),
            Err(CompileError::Structural(StructuralError::UnresolvedImport { .. }))
        ));
    }
}
