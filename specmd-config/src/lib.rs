//! Shared configuration loader for the specmd toolchain.
//!
//! `defaults/specmd.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SpecmdConfig`],
//! which converts into the [`CompileOptions`] of a run.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use specmd_core::specmd::annotate::AnchorOptions;
use specmd_core::specmd::biblio::ExternalBiblio;
use specmd_core::specmd::pipeline::CompileOptions;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/specmd.default.toml");

/// Top-level configuration consumed by specmd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecmdConfig {
    pub document: DocumentConfig,
    pub anchors: AnchorsConfig,
    pub imports: ImportsConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub biblio: BiblioConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub require_title: bool,
}

/// Mirrors the knobs of the anchor pass.
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorsConfig {
    pub section_prefix: String,
    pub min_hash_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportsConfig {
    pub parallel: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// What the command line tool prints for a compiled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One line per node with numbers and anchors
    Outline,
    /// The snapshot of the annotated tree
    Json,
    /// The finished anchor table
    Biblio,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "outline" => Some(Self::Outline),
            "json" => Some(Self::Json),
            "biblio" => Some(Self::Biblio),
            _ => None,
        }
    }
}

/// External reference tables, keyed by site URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiblioConfig {
    #[serde(default)]
    pub sites: ExternalBiblio,
}

impl SpecmdConfig {
    /// Compile options for a run; cancellation is left to the caller.
    pub fn to_compile_options(&self) -> CompileOptions {
        CompileOptions {
            anchors: AnchorOptions {
                section_prefix: self.anchors.section_prefix.clone(),
                min_hash_length: self.anchors.min_hash_length,
            },
            require_title: self.document.require_title,
            parallel_imports: self.imports.parallel,
            external_biblio: self.biblio.sites.clone(),
            cancel: None,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SpecmdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SpecmdConfig, ConfigError> {
    Loader::new().build()
}
