//! # specmd
//!
//! Compiles spec documents into an annotated, cross-referenced tree ready for rendering.
//!
//! The work is split the same way the compilation flows:
//!
//!     source text ──▶ parsing ──▶ imports ──▶ annotate ──▶ (renderer)
//!
//! - [parsing](specmd::parsing) turns one file into a draft [Document](specmd::ast::Document).
//! - [imports](specmd::imports) follows import headings and splices sub-documents in place.
//! - [annotate](specmd::annotate) numbers sections and assigns anchors, filling the
//!   [Biblio](specmd::biblio::Biblio).
//!
//! Every pass is built on the generic [visitor engine](specmd::visit).
//! Most callers only need the [Compiler](specmd::pipeline::Compiler).

pub mod specmd;
