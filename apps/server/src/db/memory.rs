//! In-process spec store, used without a database and in tests

use super::traits::{NewSpec, SpecRecord, SpecStore, STATUS_SAVED};
use crate::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemorySpecStore {
    specs: RwLock<HashMap<Uuid, SpecRecord>>,
}

impl InMemorySpecStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.specs.read().await.len()
    }
}

#[async_trait]
impl SpecStore for InMemorySpecStore {
    async fn save(&self, spec: NewSpec) -> Result<SpecRecord> {
        let record = SpecRecord {
            id: Uuid::new_v4(),
            name: spec.name,
            version: spec.version,
            status: STATUS_SAVED.to_string(),
            spec: spec.spec,
            created_at: Utc::now(),
        };
        self.specs.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SpecRecord>> {
        Ok(self.specs.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn saves_and_reads_back() {
        let store = InMemorySpecStore::new();
        let saved = store
            .save(NewSpec {
                name: "Clinic".to_string(),
                version: "1.0.0".to_string(),
                spec: json!({"entities": []}),
            })
            .await
            .unwrap();

        assert_eq!(saved.status, STATUS_SAVED);
        assert_eq!(store.get(saved.id).await.unwrap(), Some(saved));
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }
}
