//! Storage trait for model specifications

use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Status recorded for every stored specification
pub const STATUS_SAVED: &str = "SAVED";

/// A stored model specification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRecord {
    pub id: Uuid,
    pub name: String,
    pub version: String,
    pub status: String,
    /// Raw specification as submitted
    pub spec: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Specification about to be stored
#[derive(Debug, Clone)]
pub struct NewSpec {
    pub name: String,
    pub version: String,
    pub spec: JsonValue,
}

/// Storage backend for raw model specifications
///
/// Generation always works on a snapshot read from the store, so backends
/// only need to support insert and lookup by id.
#[async_trait]
pub trait SpecStore: Send + Sync {
    /// Store a specification under a new server-assigned id
    async fn save(&self, spec: NewSpec) -> Result<SpecRecord>;

    /// Read a specification
    ///
    /// # Returns
    /// * `Ok(Some(record))` - found
    /// * `Ok(None)` - no specification with this id
    async fn get(&self, id: Uuid) -> Result<Option<SpecRecord>>;
}
