//! Model-to-source generation engine
//!
//! Turns a loosely structured domain model (entity types, attributes and UML
//! relationships) into a complete Spring Boot / JPA source tree.
//!
//! ## Architecture
//!
//! The engine runs a five-stage pipeline:
//! 1. **Normalizer**: validates and canonicalizes the raw JSON model, recording
//!    every discarded item as a [`DroppedItem`]
//! 2. **Resolver**: picks a persistence mapping for each relationship (owner,
//!    inverse, join column or join table, cascade) and allocates names
//! 3. **Resolved model**: the immutable result; the only input of the emitters
//! 4. **Generators**: render artifacts from the resolved model
//! 5. **Packaging**: writes a workspace and archives it
//!
//! Naming rules live in [`naming`] and are shared by the normalizer and the
//! resolver.

pub mod error;
pub mod generators;
pub mod ir;
pub mod naming;
pub mod normalize;
pub mod package;
pub mod resolve;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub use error::{CodegenError, CodegenResult};
use generators::spring::SpringGenerator;
use generators::{Generator, GeneratorConfig};
use ir::ResolvedModel;
pub use normalize::{DropReason, DroppedItem, Limits};
pub use package::{GenerationManifest, Workspace};

/// Main entry point for code generation
pub struct CodeGenerator {
    model: ResolvedModel,
    warnings: Vec<DroppedItem>,
}

impl CodeGenerator {
    /// Normalize and resolve a raw model specification
    pub fn from_spec(raw: &Value, limits: &Limits) -> CodegenResult<Self> {
        let normalized = normalize::normalize(raw, limits)?;
        let model = resolve::resolve(&normalized.model);
        Ok(Self {
            model,
            warnings: normalized.dropped,
        })
    }

    /// Parse a JSON document and build the generator from it
    pub fn from_json_str(json: &str, limits: &Limits) -> CodegenResult<Self> {
        let raw: Value = serde_json::from_str(json)?;
        Self::from_spec(&raw, limits)
    }

    /// Get the resolved model
    pub fn model(&self) -> &ResolvedModel {
        &self.model
    }

    /// Items discarded while normalizing the input
    pub fn warnings(&self) -> &[DroppedItem] {
        &self.warnings
    }

    /// Generate code with a specific generator
    pub fn generate<G: Generator>(&self, generator: G) -> CodegenResult<G::Output> {
        generator.generate(&self.model)
    }

    /// Render Spring sources into `workspace` and describe the result
    pub fn write_spring(
        &self,
        workspace: &Workspace,
        config: GeneratorConfig,
    ) -> CodegenResult<GenerationManifest> {
        let sources = self.generate(SpringGenerator::new(config))?;
        workspace.write_sources(&sources, &self.model.project)
    }
}

/// Result of a full generation run.
///
/// Keeps the workspace alive; an ephemeral workspace is deleted when this
/// value is dropped.
#[derive(Debug)]
pub struct Generation {
    pub workspace: Workspace,
    pub manifest: GenerationManifest,
    pub warnings: Vec<DroppedItem>,
}

impl Generation {
    /// Archive the written workspace as `.tar.gz` bytes
    pub fn archive(&self) -> CodegenResult<Vec<u8>> {
        self.workspace.archive(&self.manifest)
    }
}

/// Run the whole pipeline for an in-memory specification
pub fn generate_spring(
    raw: &Value,
    limits: &Limits,
    workspace: Workspace,
    config: GeneratorConfig,
) -> CodegenResult<Generation> {
    let codegen = CodeGenerator::from_spec(raw, limits)?;
    let manifest = codegen.write_spring(&workspace, config)?;
    Ok(Generation {
        workspace,
        manifest,
        warnings: codegen.warnings,
    })
}

/// Convenience helper to run the Spring generator from a specification file.
pub fn generate_spring_from_file(
    spec_path: &Path,
    output_dir: &Path,
    limits: &Limits,
    config: GeneratorConfig,
) -> Result<Generation> {
    let text = fs::read_to_string(spec_path)
        .with_context(|| format!("reading specification {}", spec_path.display()))?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing specification {}", spec_path.display()))?;

    let workspace = Workspace::at(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    generate_spring(&raw, limits, workspace, config).context("running Spring generator")
}
