//! Command line front end for the generation engine
//!
//! Usage:
//!   healthgen generate model.json --out ./generated [--archive app.tar.gz] [--no-project-files]
//!   healthgen resolve model.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use healthgen_codegen::generators::GeneratorConfig;
use healthgen_codegen::{generate_spring_from_file, CodeGenerator, DroppedItem, Limits};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "healthgen")]
#[command(about = "Generate Spring/JPA projects from UML-style model specifications")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Maximum number of entities accepted
    #[arg(long, global = true)]
    max_entities: Option<usize>,

    /// Maximum number of relationships accepted
    #[arg(long, global = true)]
    max_relationships: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the generated project into a directory
    Generate {
        /// Model specification (JSON)
        spec: PathBuf,

        /// Output directory; created when missing
        #[arg(short, long)]
        out: PathBuf,

        /// Also write a .tar.gz of the generated project
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Skip pom.xml, Application.java and application.properties
        #[arg(long)]
        no_project_files: bool,

        /// Omit Javadoc comments
        #[arg(long)]
        no_docs: bool,
    },
    /// Print the resolved model and normalization warnings as JSON
    Resolve {
        /// Model specification (JSON)
        spec: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,healthgen_codegen=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let limits = limits(&args);

    match args.command {
        Command::Generate {
            spec,
            out,
            archive,
            no_project_files,
            no_docs,
        } => {
            let config = GeneratorConfig {
                generate_docs: !no_docs,
                project_files: !no_project_files,
            };
            let generation = generate_spring_from_file(&spec, &out, &limits, config)?;
            report_warnings(&generation.warnings);

            info!(
                "Wrote {} files for {} to {}",
                generation.manifest.files.len(),
                generation.manifest.artifact_id,
                generation.manifest.workspace_root
            );

            if let Some(path) = archive {
                let bytes = generation.archive().context("archiving generated project")?;
                fs::write(&path, &bytes)
                    .with_context(|| format!("writing archive {}", path.display()))?;
                info!("Archive: {} ({} bytes)", path.display(), bytes.len());
            }
        }
        Command::Resolve { spec } => {
            let text = fs::read_to_string(&spec)
                .with_context(|| format!("reading specification {}", spec.display()))?;
            let codegen = CodeGenerator::from_json_str(&text, &limits)
                .with_context(|| format!("resolving specification {}", spec.display()))?;
            report_warnings(codegen.warnings());

            let output = json!({
                "model": codegen.model(),
                "warnings": codegen.warnings(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn limits(args: &Args) -> Limits {
    let defaults = Limits::default();
    Limits {
        max_entities: args.max_entities.unwrap_or(defaults.max_entities),
        max_relationships: args.max_relationships.unwrap_or(defaults.max_relationships),
        max_attributes: defaults.max_attributes,
    }
}

fn report_warnings(warnings: &[DroppedItem]) {
    for item in warnings {
        warn!("Dropped {item}");
    }
}
