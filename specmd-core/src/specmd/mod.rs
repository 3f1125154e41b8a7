//! Main module for specmd library functionality

pub mod annotate;
pub mod ast;
pub mod biblio;
pub mod error;
pub mod imports;
pub mod loader;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod transforms;
pub mod visit;
