//! Workspace output and archive packaging

use crate::error::CodegenResult;
use crate::generators::GeneratedSources;
use crate::ir::ProjectInfo;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Mode recorded for every archived file
const FILE_MODE: u32 = 0o644;

/// Summary of a written workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationManifest {
    pub workspace_root: String,
    pub package_namespace: String,
    pub artifact_id: String,
    /// Forward-slash paths relative to the workspace root, sorted
    pub files: Vec<String>,
}

/// Directory that generated sources are written into.
///
/// An ephemeral workspace lives in a fresh temporary directory that is
/// removed when the value is dropped.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl Workspace {
    /// Create a unique temporary workspace
    pub fn ephemeral(prefix: &str) -> CodegenResult<Self> {
        let temp = tempfile::Builder::new().prefix(prefix).tempdir()?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            temp: Some(temp),
        })
    }

    /// Use (and create if needed) a persistent directory
    pub fn at(path: impl Into<PathBuf>) -> CodegenResult<Self> {
        let root = path.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, temp: None })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_ephemeral(&self) -> bool {
        self.temp.is_some()
    }

    /// Write every rendered file below the workspace root
    pub fn write_sources(
        &self,
        sources: &GeneratedSources,
        project: &ProjectInfo,
    ) -> CodegenResult<GenerationManifest> {
        for (relative, contents) in &sources.files {
            let path = self.root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
        }

        tracing::info!(
            root = %self.root.display(),
            files = sources.len(),
            "wrote generated sources"
        );

        Ok(GenerationManifest {
            workspace_root: self.root.display().to_string(),
            package_namespace: project.package_namespace.clone(),
            artifact_id: project.artifact_id.clone(),
            files: sources.paths().map(str::to_string).collect(),
        })
    }

    /// Pack the manifest's files into a gzip-compressed tar archive.
    ///
    /// Entries are sorted by path and carry zero timestamps and ownership, so
    /// identical inputs produce identical bytes.
    pub fn archive(&self, manifest: &GenerationManifest) -> CodegenResult<Vec<u8>> {
        let mut files = manifest.files.clone();
        files.sort();

        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.mode(tar::HeaderMode::Deterministic);

        for relative in &files {
            let contents = fs::read(self.root.join(relative))?;
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(FILE_MODE);
            header.set_mtime(0);
            header.set_uid(0);
            header.set_gid(0);
            header.set_entry_type(tar::EntryType::Regular);
            builder.append_data(&mut header, relative, contents.as_slice())?;
        }

        let encoder = builder.into_inner()?;
        let bytes = encoder.finish()?;

        tracing::debug!(
            files = files.len(),
            bytes = bytes.len(),
            "archived workspace"
        );

        Ok(bytes)
    }
}
