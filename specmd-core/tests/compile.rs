//! Compiling multi-file specs from disk

use specmd_core::specmd::ast::{snapshot_document, to_outline_str};
use specmd_core::specmd::error::{CompileError, ImportErrorKind};
use specmd_core::specmd::pipeline::{CompileOptions, Compiler};
use specmd_core::specmd::testing::assert_doc;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

fn sample_spec(dir: &Path) -> PathBuf {
    write(
        dir,
        "Section 2 -- Types.md",
        "# Types\n\n\
         :: A *Scalar* is a leaf.\n\n\
         Value : Variable\n  - IntValue\n\n\
         CoerceValue(value) :\n  1. Return value.\n",
    );
    write(
        dir,
        "index.md",
        "# Spec\n\n\
         Intro paragraph.\n\n\
         # Overview\n\n\
         **Goals**\n\n\
         - fast\n- small\n\n\
         # [Types](Section%202%20--%20Types.md)\n",
    )
}

#[test]
fn test_compile_from_disk_outline() {
    let dir = TempDir::new().unwrap();
    let index = sample_spec(dir.path());

    let compiled = Compiler::new().compile(&index).unwrap();

    insta::assert_snapshot!(to_outline_str(&compiled.document).trim_end(), @r###"
    Document "Spec"
      Paragraph
      Section 1 "Overview" #sec-Overview
        Subsection "Goals" #sec-Overview.Goals
          List
            ListItem
            ListItem
      Section 2 "Types" #sec-Types
        DefinitionParagraph
          DefinitionTerm "Scalar" #def-Scalar
        Production "Value" #Value
        Algorithm "CoerceValue()" #CoerceValue()
          ListItem
    "###);
}

#[test]
fn test_sequential_and_parallel_resolution_agree() {
    let dir = TempDir::new().unwrap();
    let index = sample_spec(dir.path());
    for i in 0..4 {
        write(dir.path(), &format!("part{}.md", i), &format!("# Part {}\n\nBody {}.\n", i, i));
    }
    write(
        dir.path(),
        "many.md",
        "# Many\n\n# [A](part0.md)\n\n# [B](part1.md)\n\n# [C](part2.md)\n\n# [D](part3.md)\n",
    );

    let sequential = Compiler::new().with_options(CompileOptions {
        parallel_imports: false,
        ..CompileOptions::default()
    });
    let parallel = Compiler::new();
    for path in [index, dir.path().join("many.md")] {
        assert_eq!(sequential.compile(&path).unwrap(), parallel.compile(&path).unwrap());
    }

    let compiled = parallel.compile(dir.path().join("many.md")).unwrap();
    assert_doc(&compiled.document)
        .title("Many")
        .item_count(4)
        .no_imports()
        .item(3, |item| {
            item.assert_section().title("Part 3").number("4").id("sec-Part-3");
        });
}

#[test]
fn test_import_cycle() {
    let dir = TempDir::new().unwrap();
    let index = write(dir.path(), "a.md", "# A\n\n# [B](b.md)\n");
    write(dir.path(), "b.md", "# B\n\n# [A again](a.md)\n");

    let err = Compiler::new().compile(&index).unwrap_err();
    match &err {
        CompileError::Import(import) => {
            assert_eq!(import.kind, ImportErrorKind::Cycle);
            assert_eq!(import.chain.len(), 2);
            assert!(import.path.ends_with("a.md"));
        }
        other => panic!("expected import error, got {}", other),
    }
    let message = err.to_string();
    assert!(message.starts_with("Import error: "), "{}", message);
    assert!(message.contains("import cycle"), "{}", message);
    assert!(message.contains("imported from"), "{}", message);
}

#[test]
fn test_missing_import_points_at_heading() {
    let dir = TempDir::new().unwrap();
    let index = write(dir.path(), "index.md", "# Spec\n\n# [Gone](gone.md)\n");

    let err = Compiler::new().compile(&index).unwrap_err();
    match err {
        CompileError::Import(import) => {
            assert_eq!(import.kind, ImportErrorKind::Missing);
            assert!(import.path.ends_with("gone.md"));
            assert_eq!(import.span.map(|span| span.start.line), Some(3));
        }
        other => panic!("expected import error, got {}", other),
    }
}

#[test]
fn test_parse_error_in_imported_file() {
    let dir = TempDir::new().unwrap();
    let index = write(dir.path(), "index.md", "# Spec\n\n# [Broken](broken.md)\n");
    write(dir.path(), "broken.md", "# Part\n\n### Deep\n");

    let err = Compiler::new().compile(&index).unwrap_err();
    let message = err.to_string();
    match &err {
        CompileError::Parse(parse) => {
            assert_eq!((parse.line, parse.column), (3, 1));
            assert_eq!(parse.import_chain.len(), 1);
        }
        other => panic!("expected parse error, got {}", other),
    }
    assert!(message.starts_with("Parse error: "), "{}", message);
    assert!(message.contains("broken.md:3:1: Heading level skipped"), "{}", message);
    assert!(message.contains(">>   3 | ### Deep"), "{}", message);
}

#[test]
fn test_snapshot_serializes_compiled_tree() {
    let dir = TempDir::new().unwrap();
    let index = sample_spec(dir.path());
    let compiled = Compiler::new().compile(&index).unwrap();

    let json = serde_json::to_value(snapshot_document(&compiled.document)).unwrap();
    assert_eq!(json["node_type"], "Document");
    assert_eq!(json["label"], "Spec");
    assert_eq!(json["children"][1]["attributes"]["id"], "sec-Overview");
    assert_eq!(json["children"][2]["attributes"]["number"], "2");
}
