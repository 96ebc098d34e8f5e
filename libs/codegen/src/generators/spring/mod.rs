//! Spring Boot / JPA generator
//!
//! Emits one persistence type, repository, service, controller, transfer
//! type and mapper per entity, plus a Maven build file, the application
//! class and `application.properties` when project files are enabled.

mod controller;
mod dto;
mod entity;
mod mapper;
mod project;
mod repository;
mod service;
mod types;

use crate::error::CodegenResult;
use crate::generators::{GeneratedSources, Generator, GeneratorConfig};
use crate::ir::ResolvedModel;

/// Source root for Java files inside a Maven project
const JAVA_ROOT: &str = "src/main/java";
const RESOURCES_ROOT: &str = "src/main/resources";

/// Sub-package of each artifact family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    Domain,
    Repository,
    Service,
    Controller,
    Dto,
    Mapper,
}

impl Layer {
    pub(crate) fn segment(self) -> &'static str {
        match self {
            Layer::Domain => "domain",
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Controller => "controller",
            Layer::Dto => "dto",
            Layer::Mapper => "mapper",
        }
    }
}

/// Shared state handed to each emitter
pub(crate) struct Emit<'a> {
    pub model: &'a ResolvedModel,
    pub config: &'a GeneratorConfig,
}

impl<'a> Emit<'a> {
    pub(crate) fn namespace(&self) -> &'a str {
        &self.model.project.package_namespace
    }

    pub(crate) fn package(&self, layer: Layer) -> String {
        format!("{}.{}", self.namespace(), layer.segment())
    }

    /// Fully qualified name of a type in a layer
    pub(crate) fn qualified(&self, layer: Layer, type_name: &str) -> String {
        format!("{}.{}", self.package(layer), type_name)
    }

    /// Relative path of a Java source file
    pub(crate) fn source_path(&self, layer: Option<Layer>, type_name: &str) -> String {
        let base = self.namespace().replace('.', "/");
        match layer {
            Some(layer) => format!("{JAVA_ROOT}/{base}/{}/{type_name}.java", layer.segment()),
            None => format!("{JAVA_ROOT}/{base}/{type_name}.java"),
        }
    }

    pub(crate) fn resource_path(&self, file_name: &str) -> String {
        format!("{RESOURCES_ROOT}/{file_name}")
    }

    pub(crate) fn docs(&self) -> bool {
        self.config.generate_docs
    }
}

/// Spring Boot code generator
pub struct SpringGenerator {
    config: GeneratorConfig,
}

impl SpringGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator for SpringGenerator {
    type Output = GeneratedSources;

    fn generate(&self, model: &ResolvedModel) -> CodegenResult<Self::Output> {
        let emit = Emit {
            model,
            config: &self.config,
        };
        let mut sources = GeneratedSources::default();

        for entity in &model.entities {
            let artifacts = &entity.artifacts;
            sources.insert(
                emit.source_path(Some(Layer::Domain), &entity.name),
                entity::render(&emit, entity),
            );
            sources.insert(
                emit.source_path(Some(Layer::Repository), &artifacts.repository),
                repository::render(&emit, entity),
            );
            sources.insert(
                emit.source_path(Some(Layer::Service), &artifacts.service),
                service::render(&emit, entity),
            );
            sources.insert(
                emit.source_path(Some(Layer::Controller), &artifacts.controller),
                controller::render(&emit, entity),
            );
            sources.insert(
                emit.source_path(Some(Layer::Dto), &artifacts.dto),
                dto::render(&emit, entity),
            );
            sources.insert(
                emit.source_path(Some(Layer::Mapper), &artifacts.mapper),
                mapper::render(&emit, entity),
            );
        }

        if self.config.project_files {
            project::render(&emit, &mut sources);
        }

        tracing::debug!(
            entities = model.entities.len(),
            files = sources.len(),
            "rendered spring sources"
        );

        Ok(sources)
    }
}
