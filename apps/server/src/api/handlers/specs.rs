//! Specification storage handlers

use crate::{db::NewSpec, state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use healthgen_codegen::normalize::{DEFAULT_PROJECT_NAME, DEFAULT_VERSION};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

/// Store a raw specification; it is only validated when generated from
pub async fn create_spec(
    State(state): State<AppState>,
    Json(spec): Json<JsonValue>,
) -> Result<Response> {
    if !spec.is_object() {
        return Err(Error::BadRequest(
            "specification must be a JSON object".to_string(),
        ));
    }

    let name = text_field(&spec, "name").unwrap_or(DEFAULT_PROJECT_NAME).to_string();
    let version = text_field(&spec, "version").unwrap_or(DEFAULT_VERSION).to_string();

    let record = state
        .spec_store
        .save(NewSpec {
            name,
            version,
            spec,
        })
        .await?;

    tracing::info!(spec_id = %record.id, name = %record.name, "Specification stored");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": record.id,
            "name": record.name,
            "version": record.version,
            "status": record.status
        })),
    )
        .into_response())
}

pub async fn get_spec(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    match state.spec_store.get(id).await? {
        Some(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        None => Err(Error::SpecNotFound(id.to_string())),
    }
}

fn text_field<'a>(spec: &'a JsonValue, key: &str) -> Option<&'a str> {
    spec.get(key)
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
