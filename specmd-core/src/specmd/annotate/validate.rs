//! Structural checks run before annotation

use crate::specmd::ast::{Document, Node};
use crate::specmd::error::StructuralError;

/// Reject documents the annotator cannot work on
///
/// A top-level document needs a title when `require_title` is set, and no import may remain
/// after resolution.
pub fn check_structure(document: &Document, require_title: bool) -> Result<(), StructuralError> {
    if require_title && document.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(StructuralError::MissingTitle);
    }
    if let Some(Node::Import(import)) = document.descendants().find(|node| node.is_import()) {
        return Err(StructuralError::UnresolvedImport {
            path: import.path.clone(),
            span: import.span.clone(),
        });
    }
    Ok(())
}
