//! ooxml-rels CLI - Inspect and rewrite OOXML relationship manifests

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ooxml_rels::{ManifestReader, ManifestWriter, Relationships, SchemaCatalog, SchemaType};

/// Inspect and rewrite OOXML relationship manifests
#[derive(ClapParser)]
#[command(name = "ooxml-rels")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log decoding details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the relationships in a .rels file
    Inspect {
        /// Input file
        input: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Directory relative targets resolve against
        #[arg(short, long, default_value = "")]
        root: String,

        /// Skip incomplete Relationship elements instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Decode and re-encode a .rels file, printing the result
    Rewrite {
        /// Input file
        input: PathBuf,

        /// Indentation width
        #[arg(short, long, default_value = "2")]
        indent: usize,
    },

    /// List the known relationship types
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = SchemaCatalog::global();

    match cli.command {
        Commands::Inspect {
            input,
            json,
            root,
            lenient,
        } => {
            let records = ManifestReader::new()
                .with_strict(!lenient)
                .read_file(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let rels = Relationships::from_records(&records, catalog);

            if json {
                println!("{}", serde_json::to_string_pretty(&rels)?);
                return Ok(());
            }

            println!("{} {}", "✓".green().bold(), input.display());
            println!("  Relationships: {}", rels.len());
            println!("  Unknown types: {}", rels.unknown().count());

            for rel in &rels {
                let kind = if rel.schema_type.is_known() {
                    rel.schema_type.name().cyan()
                } else {
                    rel.schema_type.name().yellow()
                };
                let path = if root.is_empty() {
                    rel.target.to_string()
                } else {
                    rel.resolve_path(&root)
                };
                println!("  {} {} -> {}", rel.id.as_str().bold(), kind, path);
            }
        }

        Commands::Rewrite { input, indent } => {
            let records = ManifestReader::new()
                .read_file(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let rels = Relationships::from_records(&records, catalog);
            let xml = ManifestWriter::new()
                .with_indent(indent)
                .write(&rels.to_records(catalog))?;
            println!("{}", xml);
        }

        Commands::Catalog => {
            println!("Known relationship types: {}", catalog.len());
            for (tag, uri) in catalog.iter() {
                let schema = SchemaType::Known(tag);
                let name = if schema.is_vendor_extension() {
                    tag.name().yellow()
                } else if tag.traits().is_empty() {
                    tag.name().normal()
                } else {
                    tag.name().green()
                };
                println!("  {:<24} {}", name, uri);
            }
        }
    }

    Ok(())
}
