//! Narrative — align case narratives against topical categories.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use narrative_align::NarrativeAligner;
use narrative_core::{CategorySet, NarrativeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_config(arg: Option<&String>) -> anyhow::Result<NarrativeConfig> {
    let path = arg
        .map(PathBuf::from)
        .or_else(|| std::env::var("NARRATIVE_CONFIG").ok().map(PathBuf::from));

    let config = match path {
        Some(path) => NarrativeConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => NarrativeConfig::from_env()?,
    };
    Ok(config)
}

fn build_aligner(config: &NarrativeConfig) -> anyhow::Result<NarrativeAligner> {
    let categories = CategorySet::from_json_file(&config.categories).with_context(|| {
        format!("Failed to load categories {}", config.categories.display())
    })?;
    info!("Loaded {} categories", categories.len());

    let provider = narrative_infer::create_provider(
        config.embeddings.as_deref(),
        config.align.similarity_cache_size,
    )
    .context("Failed to load word vectors")?;

    Ok(NarrativeAligner::new(provider, categories, config.align.clone())?)
}

fn read_text(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(Path::new(source))
        .with_context(|| format!("Failed to read narrative {}", source))
}

fn print_help() {
    println!("Narrative — token-category alignment for case narratives");
    println!();
    println!("Usage: narrative <command>");
    println!();
    println!("Commands:");
    println!("  align <text-file|-> [config]   Align a narrative and print the JSON report");
    println!("  validate [config]              Load configuration, categories and vectors");
    println!("  help                           Show this help message");
    println!();
    println!("Without a config argument, NARRATIVE_CONFIG or NARRATIVE_CATEGORIES is used.");
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("align") | Some("--align") => {
            let Some(source) = args.get(2) else {
                eprintln!("Usage: narrative align <text-file|-> [config]");
                std::process::exit(1);
            };
            let config = resolve_config(args.get(3))?;
            let aligner = build_aligner(&config)?;
            let text = read_text(source)?;

            let report = aligner.align_text(&text);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some("validate") | Some("--validate") => {
            let config = resolve_config(args.get(2))?;
            let aligner = build_aligner(&config)?;
            println!(
                "OK: {} categories, k={}, rate={:?}, composition={:?}",
                aligner.categories().len(),
                aligner.config().k,
                aligner.config().rate_strategy,
                aligner.config().phrase_composition,
            );
        }
        None | Some("help") | Some("--help") | Some("-h") => print_help(),
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'narrative help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
