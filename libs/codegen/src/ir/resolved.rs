//! Resolved model
//!
//! Built once per generation by the resolver and then only read. Every
//! identifier an emitter prints (type, field, column, table, path, artifact
//! names) is stored here so that both sides of a relationship, and all six
//! artifacts of an entity, agree on the same literals.

use super::{Attribute, ProjectInfo, RelationshipKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    pub project: ProjectInfo,
    pub entities: Vec<ResolvedEntity>,
    pub relationships: Vec<ResolvedRelationship>,
}

impl ResolvedModel {
    pub fn entity(&self, name: &str) -> Option<&ResolvedEntity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntity {
    pub name: String,
    /// Lower camel case instance name (`medicalRecord`)
    pub variable_name: String,
    pub table_name: String,
    pub resource_path: String,
    pub artifacts: ArtifactNames,
    pub attributes: Vec<Attribute>,
    pub fields: Vec<RelationField>,
}

impl ResolvedEntity {
    pub fn primary_key(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is_primary_key)
    }

    pub fn field(&self, name: &str) -> Option<&RelationField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_collections(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.cardinality == FieldCardinality::Collection)
    }
}

/// Type names of the per-entity artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactNames {
    pub repository: String,
    pub service: String,
    pub controller: String,
    pub dto: String,
    pub mapper: String,
}

impl ArtifactNames {
    pub fn for_type(type_name: &str) -> Self {
        Self {
            repository: format!("{type_name}Repository"),
            service: format!("{type_name}Service"),
            controller: format!("{type_name}Controller"),
            dto: format!("{type_name}Dto"),
            mapper: format!("{type_name}Mapper"),
        }
    }
}

/// A relationship-backed field on one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationField {
    pub name: String,
    /// Entity type on the other end
    pub counterpart: String,
    pub cardinality: FieldCardinality,
    pub role: FieldRole,
    pub category: StructuralCategory,
    pub cascade_on_delete: bool,
    pub orphan_removal: bool,
    /// Flattened reference name on the transfer shape (`doctorId`, `patientIds`)
    pub transfer_name: String,
    /// Index into [`ResolvedModel::relationships`]
    pub relationship: usize,
}

impl RelationField {
    pub fn is_owner(&self) -> bool {
        matches!(self.role, FieldRole::Owner { .. })
    }

    pub fn is_collection(&self) -> bool {
        self.cardinality == FieldCardinality::Collection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldCardinality {
    Single,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "role")]
pub enum FieldRole {
    /// Carries the foreign key or join table
    Owner { join: JoinSpec },
    /// Back-reference; `mapped_by` is the owner field's literal name
    Inverse { mapped_by: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "type")]
pub enum JoinSpec {
    ForeignKey {
        column: String,
        unique: bool,
    },
    JoinTable {
        table: String,
        join_column: String,
        inverse_join_column: String,
    },
}

impl JoinSpec {
    pub fn identifier(&self) -> &str {
        match self {
            JoinSpec::ForeignKey { column, .. } => column,
            JoinSpec::JoinTable { table, .. } => table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructuralCategory {
    OneToOne,
    /// One-to-many seen from the collection side, many-to-one from the owner
    OneToMany,
    ManyToMany,
    SelfReferencingHierarchy,
    None,
}

/// Mapping strategy chosen for one input relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRelationship {
    pub kind: RelationshipKind,
    pub source: String,
    pub target: String,
    pub category: StructuralCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owning_side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_identifier: Option<String>,
    pub cascade_on_delete: bool,
}
