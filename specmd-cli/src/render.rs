//! Output formats for a compiled document

use specmd_config::OutputFormat;
use specmd_core::specmd::ast::{snapshot_document, to_outline_str};
use specmd_core::specmd::pipeline::Compiled;

pub fn render(compiled: &Compiled, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Outline => Ok(to_outline_str(&compiled.document)),
        OutputFormat::Json => {
            let snapshot = snapshot_document(&compiled.document);
            serde_json::to_string_pretty(&snapshot).map(|json| json + "\n")
        }
        OutputFormat::Biblio => {
            serde_json::to_string_pretty(&compiled.biblio).map(|json| json + "\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specmd_core::specmd::pipeline::Compiler;

    fn compiled() -> Compiled {
        Compiler::new()
            .compile_source("spec.md", "# Spec\n\n# Intro\n\nHello.\n")
            .unwrap()
    }

    #[test]
    fn test_outline_output() {
        let out = render(&compiled(), OutputFormat::Outline).unwrap();
        assert_eq!(out, "Document \"Spec\"\n  Section 1 \"Intro\" #sec-Intro\n    Paragraph\n");
    }

    #[test]
    fn test_biblio_output() {
        let out = render(&compiled(), OutputFormat::Biblio).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["sec-Intro"], "#sec-Intro");
    }

    #[test]
    fn test_json_output() {
        let out = render(&compiled(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["children"][0]["label"], "Intro");
    }
}
