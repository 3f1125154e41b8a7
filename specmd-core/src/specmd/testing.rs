//! Testing utilities
//!
//!     Helpers shared by the unit tests, the integration tests under `tests/` and downstream
//!     crates that want to check compiled trees.
//!
//!     Trees are checked with the fluent assertions in [assertions]. Every step carries a
//!     context path (`items[1]:children[0]`) so a failing assertion says exactly where in the
//!     tree it looked:
//!
//!     ```rust,ignore
//!     use specmd_core::specmd::testing::assert_doc;
//!
//!     assert_doc(&compiled.document)
//!         .title("Spec")
//!         .item_count(2)
//!         .item(0, |item| {
//!             item.assert_section()
//!                 .title("Intro")
//!                 .number("1")
//!                 .id("sec-Intro")
//!                 .child(0, |child| {
//!                     child.assert_paragraph();
//!                 });
//!         });
//!     ```
//!
//!     Input trees for visitor and annotation tests are built with the short constructors in
//!     [builders], which keep test bodies readable when a tree has a dozen nodes:
//!
//!     ```rust,ignore
//!     use specmd_core::specmd::testing::builders::*;
//!
//!     let doc = doc("Spec", vec![section("Intro", vec![para("Hello.")]), import("types.md")]);
//!     ```
//!
//!     Prefer compiling real sources through the [Compiler](crate::specmd::pipeline::Compiler)
//!     when the parser is part of what is being tested, and builders when it is not.

pub mod assertions;
pub mod builders;

pub use assertions::{
    assert_doc, CodeAssertion, DocumentAssertion, NodeAssertion, ProductionAssertion,
    SectionAssertion,
};
