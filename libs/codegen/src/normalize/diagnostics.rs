//! Diagnostics for input items discarded during normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an input item was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    BlankEntityName,
    DuplicateEntity,
    BlankAttributeName,
    DuplicateAttribute,
    /// A second (or later) attribute marked as primary key; it is kept as a plain column
    ExtraPrimaryKey,
    /// The generation strategy is ignored, the attribute is kept
    UnknownGenerationStrategy,
    UnknownRelationshipKind,
    BlankRelationshipEndpoint,
    UnknownRelationshipEndpoint,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::BlankEntityName => "entity has a blank name",
            DropReason::DuplicateEntity => "entity name already declared",
            DropReason::BlankAttributeName => "attribute has a blank name",
            DropReason::DuplicateAttribute => "attribute name already declared on this entity",
            DropReason::ExtraPrimaryKey => "entity already has a primary key",
            DropReason::UnknownGenerationStrategy => "unrecognized generation strategy",
            DropReason::UnknownRelationshipKind => "unrecognized relationship kind",
            DropReason::BlankRelationshipEndpoint => "relationship endpoint is blank",
            DropReason::UnknownRelationshipEndpoint => "relationship references an unknown entity",
        };
        f.write_str(text)
    }
}

/// One discarded (or partially discarded) input item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedItem {
    pub reason: DropReason,
    /// JSON-path-like location in the input, e.g. `relations[2]`
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DroppedItem {
    pub fn new(reason: DropReason, location: impl Into<String>) -> Self {
        Self {
            reason,
            location: location.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for DroppedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
