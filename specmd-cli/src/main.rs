//! Command-line interface for specmd
//! This binary compiles a spec document, following its imports, and prints the annotated result.
//!
//! Usage:
//!   specmd `<path>` [--format outline|json|biblio]        - Compile and print the document
//!   specmd `<path>` --config `<file>` --biblio `<seed>`    - Layer settings and external anchors
//!
//! Logging goes to stderr; `-v` raises the level one step per flag, `RUST_LOG` refines it.

mod render;

use clap::{Arg, ArgAction, Command};
use specmd_config::{Loader, OutputFormat, SpecmdConfig};
use specmd_core::specmd::biblio::ExternalBiblio;
use specmd_core::specmd::pipeline::Compiler;
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("specmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile spec documents into a numbered, anchored tree")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the top-level spec document")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: outline, json or biblio (default from configuration)"),
        )
        .arg(
            Arg::new("biblio")
                .long("biblio")
                .short('b')
                .help("JSON file of external anchors (site URL -> id -> path suffix)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .help("Resolve imports one at a time")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (repeatable)")
                .action(ArgAction::Count),
        )
        .get_matches();

    setup_logging(matches.get_count("verbose"));

    let config = load_config(matches.get_one::<String>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(2);
    });

    let format = match matches.get_one::<String>("format") {
        Some(name) => OutputFormat::parse(name).unwrap_or_else(|| {
            eprintln!("Format '{}' not supported", name);
            eprintln!("Available formats: outline, json, biblio");
            process::exit(2);
        }),
        None => config.output.format,
    };

    let mut options = config.to_compile_options();
    if matches.get_flag("sequential") {
        options.parallel_imports = false;
    }
    for seed in matches.get_many::<String>("biblio").unwrap_or_default() {
        let sites = load_biblio_seed(seed).unwrap_or_else(|e| {
            eprintln!("Cannot load biblio {}: {}", seed, e);
            process::exit(2);
        });
        for (site, refs) in sites {
            options.external_biblio.entry(site).or_default().extend(refs);
        }
    }

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let compiled = Compiler::new()
        .with_options(options)
        .compile(path)
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        });

    let output = render::render(&compiled, format).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        process::exit(1);
    });
    print!("{}", output);
}

fn load_config(path: Option<&String>) -> Result<SpecmdConfig, specmd_config::ConfigError> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader.build()
}

fn load_biblio_seed(path: &str) -> Result<ExternalBiblio, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
