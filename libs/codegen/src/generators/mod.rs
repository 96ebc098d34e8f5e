//! Artifact emitters
//!
//! Each target technology has its own module that implements the
//! [`Generator`] trait. Generators read names from the [`ResolvedModel`] and
//! never derive identifiers of their own.

pub mod spring;

use crate::error::CodegenResult;
use crate::ir::ResolvedModel;
use serde::Serialize;
use std::collections::BTreeMap;

/// Trait that all target generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Render artifacts from the resolved model
    fn generate(&self, model: &ResolvedModel) -> CodegenResult<Self::Output>;
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether to emit documentation comments
    pub generate_docs: bool,
    /// Whether to emit build and bootstrap files (`pom.xml`, application class, properties)
    pub project_files: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            project_files: true,
        }
    }
}

/// Rendered files keyed by forward-slash relative path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedSources {
    pub files: BTreeMap<String, String>,
}

impl GeneratedSources {
    pub fn insert(&mut self, path: impl Into<String>, contents: String) {
        self.files.insert(path.into(), contents);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
