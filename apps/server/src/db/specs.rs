//! PostgreSQL spec store

use super::traits::{NewSpec, SpecRecord, SpecStore, STATUS_SAVED};
use crate::Result;
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresSpecStore {
    pool: PgPool,
}

impl PostgresSpecStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: PgRow) -> SpecRecord {
    SpecRecord {
        id: row.get("id"),
        name: row.get("name"),
        version: row.get("version"),
        status: row.get("status"),
        spec: row.get("spec"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl SpecStore for PostgresSpecStore {
    async fn save(&self, spec: NewSpec) -> Result<SpecRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO model_specs (id, name, version, status, spec)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, version, status, spec, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&spec.name)
        .bind(&spec.version)
        .bind(STATUS_SAVED)
        .bind(&spec.spec)
        .fetch_one(&self.pool)
        .await?;

        Ok(record_from_row(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<SpecRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, version, status, spec, created_at
            FROM model_specs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(record_from_row))
    }
}
