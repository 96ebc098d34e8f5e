//! Intermediate Representation (IR)
//!
//! Typed model produced by the normalizer ([`NormalizedModel`]) and the
//! immutable, fully named model produced by the resolver ([`ResolvedModel`]).
//! Emitters consume only the latter.

mod resolved;

pub use resolved::{
    ArtifactNames, FieldCardinality, FieldRole, JoinSpec, RelationField, ResolvedEntity,
    ResolvedModel, ResolvedRelationship, StructuralCategory,
};

use serde::{Deserialize, Serialize};

/// Project-level metadata carried through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub package_namespace: String,
    pub artifact_id: String,
}

/// Normalized, typed model: entity types plus surviving relationships
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedModel {
    pub project: ProjectInfo,
    pub entities: Vec<EntityType>,
    pub relationships: Vec<Relationship>,
}

impl NormalizedModel {
    /// Case-insensitive entity lookup
    pub fn entity(&self, name: &str) -> Option<&EntityType> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl EntityType {
    /// The primary-key attribute. Normalization guarantees exactly one.
    pub fn primary_key(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is_primary_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub semantic_type: SemanticType,
    pub is_primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationStrategy>,
}

impl Attribute {
    /// Synthetic `id: Long` identity key
    pub fn synthetic_id() -> Self {
        Self {
            name: "id".to_string(),
            semantic_type: SemanticType::Long,
            is_primary_key: true,
            generation: Some(GenerationStrategy::Identity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Long,
    Int,
    Boolean,
    Decimal,
    Date,
    DateTime,
    String,
}

impl SemanticType {
    /// Map a type tag case-insensitively. Unrecognized or absent tags are `String`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return SemanticType::String;
        };
        match tag.trim().to_ascii_uppercase().as_str() {
            "LONG" => SemanticType::Long,
            "INT" | "INTEGER" => SemanticType::Int,
            "BOOLEAN" | "BOOL" => SemanticType::Boolean,
            "DECIMAL" => SemanticType::Decimal,
            "DATE" | "LOCAL_DATE" => SemanticType::Date,
            "DATETIME" | "LOCAL_DATE_TIME" | "TIMESTAMP" => SemanticType::DateTime,
            _ => SemanticType::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStrategy {
    Identity,
    Sequence,
    Table,
    Auto,
    Uuid,
}

impl GenerationStrategy {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "IDENTITY" => Some(GenerationStrategy::Identity),
            "SEQUENCE" => Some(GenerationStrategy::Sequence),
            "TABLE" => Some(GenerationStrategy::Table),
            "AUTO" => Some(GenerationStrategy::Auto),
            "UUID" => Some(GenerationStrategy::Uuid),
            _ => None,
        }
    }
}

/// UML relationship kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    Association,
    Aggregation,
    Composition,
    Generalization,
    Dependency,
    Realization,
    Unknown,
}

impl RelationshipKind {
    /// Case-insensitive match; `uml.` and `custom.` diagram prefixes are ignored.
    pub fn from_tag(tag: &str) -> Self {
        let lowered = tag.trim().to_ascii_lowercase();
        let bare = lowered
            .strip_prefix("uml.")
            .or_else(|| lowered.strip_prefix("custom."))
            .unwrap_or(&lowered);
        match bare {
            "association" => RelationshipKind::Association,
            "aggregation" => RelationshipKind::Aggregation,
            "composition" => RelationshipKind::Composition,
            "generalization" => RelationshipKind::Generalization,
            "dependency" => RelationshipKind::Dependency,
            "realization" => RelationshipKind::Realization,
            _ => RelationshipKind::Unknown,
        }
    }

    /// Kinds that map to persistent fields
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            RelationshipKind::Association
                | RelationshipKind::Aggregation
                | RelationshipKind::Composition
        )
    }
}

/// One end of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// `1`
    One,
    /// `0..1`
    ZeroOrOne,
    /// `*`
    Many,
    /// `0..*`
    ZeroOrMany,
    /// `1..*`
    OneOrMany,
    /// Blank / absent
    Unspecified,
    /// Any other token, kept verbatim
    Other(String),
}

impl Multiplicity {
    pub fn parse(raw: &str) -> Self {
        let token: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        match token.to_ascii_lowercase().as_str() {
            "" => Multiplicity::Unspecified,
            "1" | "1..1" | "one" => Multiplicity::One,
            "0..1" => Multiplicity::ZeroOrOne,
            "*" => Multiplicity::Many,
            "0..*" | "many" => Multiplicity::ZeroOrMany,
            "1..*" => Multiplicity::OneOrMany,
            _ => Multiplicity::Other(token),
        }
    }

    /// `*`, `0..*` and `1..*` are MANY; every other token (blank included) is ONE.
    pub fn is_many(&self) -> bool {
        matches!(
            self,
            Multiplicity::Many | Multiplicity::ZeroOrMany | Multiplicity::OneOrMany
        )
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Multiplicity::Unspecified)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Multiplicity::One => "1",
            Multiplicity::ZeroOrOne => "0..1",
            Multiplicity::Many => "*",
            Multiplicity::ZeroOrMany => "0..*",
            Multiplicity::OneOrMany => "1..*",
            Multiplicity::Unspecified => "",
            Multiplicity::Other(token) => token,
        }
    }
}

impl Serialize for Multiplicity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Multiplicity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Multiplicity::parse(&s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub source: String,
    pub target: String,
    pub multiplicity_source: Multiplicity,
    pub multiplicity_target: Multiplicity,
}

impl Relationship {
    pub fn is_self_reference(&self) -> bool {
        self.source == self.target
    }
}
