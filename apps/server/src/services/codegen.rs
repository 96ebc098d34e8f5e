//! Code generation service
//!
//! Runs the synchronous generation pipeline on the blocking thread pool,
//! bounded by the configured deadline. Each run gets its own ephemeral
//! workspace, which is removed before the result is returned.

use crate::{config::CodegenConfig, Error, Result};
use healthgen_codegen::generators::GeneratorConfig;
use healthgen_codegen::{generate_spring, CodegenResult, DroppedItem, GenerationManifest, Limits, Workspace};
use serde_json::Value as JsonValue;
use std::time::Duration;

/// What one generation run produced
#[derive(Debug)]
pub struct GenerationOutcome {
    pub manifest: GenerationManifest,
    pub warnings: Vec<DroppedItem>,
    /// `.tar.gz` bytes, when an archive was requested
    pub archive: Option<Vec<u8>>,
}

pub struct CodegenService {
    limits: Limits,
    deadline: Duration,
    workspace_prefix: String,
    generator: GeneratorConfig,
}

impl CodegenService {
    pub fn new(config: &CodegenConfig) -> Self {
        Self {
            limits: config.limits(),
            deadline: Duration::from_secs(config.deadline_seconds),
            workspace_prefix: config.workspace_prefix.clone(),
            generator: GeneratorConfig {
                generate_docs: config.generate_docs,
                project_files: config.project_files,
            },
        }
    }

    /// Generate into a throwaway workspace and describe the written files
    #[tracing::instrument(name = "codegen.manifest", skip_all)]
    pub async fn manifest(&self, spec: JsonValue) -> Result<GenerationOutcome> {
        self.run(spec, false).await
    }

    /// Generate and archive the workspace
    #[tracing::instrument(name = "codegen.archive", skip_all)]
    pub async fn archive(&self, spec: JsonValue) -> Result<GenerationOutcome> {
        self.run(spec, true).await
    }

    async fn run(&self, spec: JsonValue, with_archive: bool) -> Result<GenerationOutcome> {
        let limits = self.limits;
        let prefix = self.workspace_prefix.clone();
        let generator = self.generator.clone();

        let task = tokio::task::spawn_blocking(move || -> CodegenResult<GenerationOutcome> {
            let workspace = Workspace::ephemeral(&prefix)?;
            let generation = generate_spring(&spec, &limits, workspace, generator)?;
            let archive = if with_archive {
                Some(generation.archive()?)
            } else {
                None
            };
            Ok(GenerationOutcome {
                manifest: generation.manifest,
                warnings: generation.warnings,
                archive,
            })
        });

        let outcome = match tokio::time::timeout(self.deadline, task).await {
            Err(_) => {
                tracing::warn!(
                    deadline_seconds = self.deadline.as_secs(),
                    "Generation exceeded deadline"
                );
                return Err(Error::Timeout(self.deadline.as_secs()));
            }
            Ok(Err(join_error)) => {
                return Err(Error::Internal(format!(
                    "generation task failed: {join_error}"
                )))
            }
            Ok(Ok(result)) => result?,
        };

        tracing::info!(
            artifact_id = %outcome.manifest.artifact_id,
            files = outcome.manifest.files.len(),
            warnings = outcome.warnings.len(),
            archive_bytes = outcome.archive.as_ref().map(Vec::len),
            "Generation finished"
        );

        Ok(outcome)
    }
}
