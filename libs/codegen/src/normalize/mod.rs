//! Normalizer
//!
//! Turns a raw, loosely typed model specification (JSON) into a
//! [`NormalizedModel`]. Malformed top-level input is an error; malformed
//! individual items are dropped and reported as [`DroppedItem`]s so
//! generation can proceed with the trimmed model.

mod diagnostics;

pub use diagnostics::{DropReason, DroppedItem};

use crate::error::{CodegenError, CodegenResult};
use crate::ir::{
    Attribute, EntityType, GenerationStrategy, Multiplicity, NormalizedModel, ProjectInfo,
    Relationship, RelationshipKind, SemanticType,
};
use crate::naming;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_PROJECT_NAME: &str = "generated-app";
pub const DEFAULT_VERSION: &str = "0.0.1";
pub const DEFAULT_PACKAGE_NAMESPACE: &str = "com.example.demo";

/// Input-size bounds applied before any work is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_entities: usize,
    pub max_relationships: usize,
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_entities: 200,
            max_relationships: 500,
            max_attributes: 200,
        }
    }
}

/// Normalized model plus everything that was discarded on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub model: NormalizedModel,
    pub dropped: Vec<DroppedItem>,
}

/// Normalize a raw model specification.
pub fn normalize(raw: &Value, limits: &Limits) -> CodegenResult<Normalized> {
    let spec = raw
        .as_object()
        .ok_or_else(|| CodegenError::InvalidSpec("specification must be a JSON object".into()))?;

    let raw_entities = match spec.get("entities") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(CodegenError::InvalidSpec(
                "'entities' must be an array".into(),
            ))
        }
        None => {
            return Err(CodegenError::InvalidSpec(
                "missing required field 'entities'".into(),
            ))
        }
    };

    let raw_relations = match spec.get("relations") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Null) | None => &[],
        Some(_) => {
            return Err(CodegenError::InvalidSpec(
                "'relations' must be an array".into(),
            ))
        }
    };

    check_limit("entity", raw_entities.len(), limits.max_entities)?;
    check_limit("relationship", raw_relations.len(), limits.max_relationships)?;

    let project = parse_project(spec)?;

    let mut dropped = Vec::new();
    let entities = normalize_entities(raw_entities, limits, &mut dropped)?;
    let relationships = normalize_relations(raw_relations, &entities, &mut dropped);

    for item in &dropped {
        tracing::debug!(location = %item.location, reason = %item.reason, "Dropped model item");
    }

    Ok(Normalized {
        model: NormalizedModel {
            project,
            entities,
            relationships,
        },
        dropped,
    })
}

fn check_limit(what: &'static str, actual: usize, limit: usize) -> CodegenResult<()> {
    if actual > limit {
        return Err(CodegenError::LimitExceeded {
            what,
            actual,
            limit,
        });
    }
    Ok(())
}

fn parse_project(spec: &serde_json::Map<String, Value>) -> CodegenResult<ProjectInfo> {
    let name = non_blank_str(spec.get("name")).unwrap_or(DEFAULT_PROJECT_NAME);
    let version = non_blank_str(spec.get("version")).unwrap_or(DEFAULT_VERSION);
    let package_namespace = non_blank_str(spec.get("packageNamespace"))
        .or_else(|| non_blank_str(spec.get("packageBase")))
        .unwrap_or(DEFAULT_PACKAGE_NAMESPACE);

    if !is_valid_namespace(package_namespace) {
        return Err(CodegenError::InvalidSpec(format!(
            "package namespace '{package_namespace}' is not a dotted identifier"
        )));
    }

    Ok(ProjectInfo {
        name: name.to_string(),
        version: version.to_string(),
        package_namespace: package_namespace.to_string(),
        artifact_id: naming::to_artifact_id(name),
    })
}

/// `com.example.demo`: non-empty segments, each a Java identifier
fn is_valid_namespace(namespace: &str) -> bool {
    namespace.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn normalize_entities(
    raw_entities: &[Value],
    limits: &Limits,
    dropped: &mut Vec<DroppedItem>,
) -> CodegenResult<Vec<EntityType>> {
    let mut entities = Vec::with_capacity(raw_entities.len());
    let mut seen = HashSet::new();

    for (index, raw) in raw_entities.iter().enumerate() {
        let location = format!("entities[{index}]");

        let name = non_blank_str(raw.get("name"))
            .map(naming::to_type_case)
            .unwrap_or_default();
        if name.is_empty() {
            dropped.push(DroppedItem::new(DropReason::BlankEntityName, location));
            continue;
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            dropped.push(DroppedItem::new(DropReason::DuplicateEntity, location).with_detail(name));
            continue;
        }

        let raw_attributes = raw
            .get("attributes")
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();
        check_limit("attribute", raw_attributes.len(), limits.max_attributes)?;

        let attributes = normalize_attributes(raw_attributes, &location, dropped);
        entities.push(EntityType { name, attributes });
    }

    Ok(entities)
}

fn normalize_attributes(
    raw_attributes: &[Value],
    entity_location: &str,
    dropped: &mut Vec<DroppedItem>,
) -> Vec<Attribute> {
    let mut attributes: Vec<Attribute> = Vec::with_capacity(raw_attributes.len() + 1);
    let mut seen = HashSet::new();
    let mut has_key = false;

    for (index, raw) in raw_attributes.iter().enumerate() {
        let location = format!("{entity_location}.attributes[{index}]");

        let name = non_blank_str(raw.get("name"))
            .map(naming::to_field_case)
            .unwrap_or_default();
        if name.is_empty() {
            dropped.push(DroppedItem::new(DropReason::BlankAttributeName, location));
            continue;
        }
        if !seen.insert(name.clone()) {
            dropped.push(
                DroppedItem::new(DropReason::DuplicateAttribute, location).with_detail(name),
            );
            continue;
        }

        let semantic_type = SemanticType::from_tag(raw.get("type").and_then(|v| v.as_str()));

        let mut is_primary_key = raw.get("pk").and_then(|v| v.as_bool()).unwrap_or(false);
        if is_primary_key && has_key {
            dropped.push(
                DroppedItem::new(DropReason::ExtraPrimaryKey, location.clone())
                    .with_detail(name.clone()),
            );
            is_primary_key = false;
        }
        has_key |= is_primary_key;

        let generation = match raw.get("generated") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::Bool(true)) => Some(GenerationStrategy::Identity),
            Some(Value::String(tag)) if tag.trim().is_empty() => None,
            Some(other) => {
                let tag = other
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| other.to_string());
                let strategy = GenerationStrategy::from_tag(&tag);
                if strategy.is_none() {
                    dropped.push(
                        DroppedItem::new(DropReason::UnknownGenerationStrategy, location)
                            .with_detail(tag),
                    );
                }
                strategy
            }
        };

        attributes.push(Attribute {
            name,
            semantic_type,
            is_primary_key,
            generation,
        });
    }

    if !has_key {
        ensure_primary_key(&mut attributes);
    }

    attributes
}

/// Promote an attribute named `id` to key, or prepend a synthetic identity key.
fn ensure_primary_key(attributes: &mut Vec<Attribute>) {
    if let Some(id) = attributes.iter_mut().find(|a| a.name == "id") {
        id.is_primary_key = true;
        if id.generation.is_none() {
            id.generation = Some(GenerationStrategy::Identity);
        }
    } else {
        attributes.insert(0, Attribute::synthetic_id());
    }
}

fn normalize_relations(
    raw_relations: &[Value],
    entities: &[EntityType],
    dropped: &mut Vec<DroppedItem>,
) -> Vec<Relationship> {
    let by_key: HashMap<String, &str> = entities
        .iter()
        .map(|e| (e.name.to_ascii_lowercase(), e.name.as_str()))
        .collect();

    let mut relationships = Vec::with_capacity(raw_relations.len());

    for (index, raw) in raw_relations.iter().enumerate() {
        let location = format!("relations[{index}]");

        let kind_tag = non_blank_str(raw.get("type"))
            .or_else(|| non_blank_str(raw.get("kind")))
            .unwrap_or_default();
        let kind = RelationshipKind::from_tag(kind_tag);
        if kind == RelationshipKind::Unknown {
            dropped.push(
                DroppedItem::new(DropReason::UnknownRelationshipKind, location)
                    .with_detail(kind_tag),
            );
            continue;
        }

        let (Some(source), Some(target)) = (
            non_blank_str(raw.get("source")),
            non_blank_str(raw.get("target")),
        ) else {
            dropped.push(DroppedItem::new(
                DropReason::BlankRelationshipEndpoint,
                location,
            ));
            continue;
        };

        let resolve = |name: &str| {
            by_key
                .get(&naming::to_type_case(name).to_ascii_lowercase())
                .copied()
        };
        let (source_name, target_name) = match (resolve(source), resolve(target)) {
            (Some(s), Some(t)) => (s, t),
            (s, _) => {
                let missing = if s.is_none() { source } else { target };
                dropped.push(
                    DroppedItem::new(DropReason::UnknownRelationshipEndpoint, location)
                        .with_detail(missing),
                );
                continue;
            }
        };

        let mut multiplicity_source =
            Multiplicity::parse(multiplicity_token(raw, "multSource", "multiplicitySource"));
        let mut multiplicity_target =
            Multiplicity::parse(multiplicity_token(raw, "multTarget", "multiplicityTarget"));

        if multiplicity_source.is_unspecified() && multiplicity_target.is_unspecified() {
            match kind {
                RelationshipKind::Association => {
                    multiplicity_source = Multiplicity::One;
                    multiplicity_target = Multiplicity::One;
                }
                // containment is assumed when no cardinality is given
                RelationshipKind::Aggregation | RelationshipKind::Composition => {
                    multiplicity_source = Multiplicity::One;
                    multiplicity_target = Multiplicity::Many;
                }
                _ => {}
            }
        }

        relationships.push(Relationship {
            kind,
            source: source_name.to_string(),
            target: target_name.to_string(),
            multiplicity_source,
            multiplicity_target,
        });
    }

    relationships
}

fn multiplicity_token<'a>(raw: &'a Value, key: &str, alias: &str) -> &'a str {
    raw.get(key)
        .or_else(|| raw.get(alias))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
}
