//! Generation handlers

use crate::{services::GenerationOutcome, state::AppState, Error, Result};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use healthgen_codegen::{DroppedItem, GenerationManifest};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Response header carrying the number of normalization warnings
pub const WARNINGS_HEADER: &str = "x-codegen-warnings";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestResponse {
    #[serde(flatten)]
    pub manifest: GenerationManifest,
    pub warnings: Vec<DroppedItem>,
}

pub async fn manifest_for_spec(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let spec = load_spec(&state, id).await?;
    let outcome = state.codegen_service.manifest(spec).await?;
    Ok(manifest_response(outcome))
}

pub async fn archive_for_spec(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let spec = load_spec(&state, id).await?;
    let outcome = state.codegen_service.archive(spec).await?;
    archive_response(outcome)
}

pub async fn manifest_inline(
    State(state): State<AppState>,
    Json(spec): Json<JsonValue>,
) -> Result<Response> {
    let outcome = state.codegen_service.manifest(spec).await?;
    Ok(manifest_response(outcome))
}

pub async fn archive_inline(
    State(state): State<AppState>,
    Json(spec): Json<JsonValue>,
) -> Result<Response> {
    let outcome = state.codegen_service.archive(spec).await?;
    archive_response(outcome)
}

async fn load_spec(state: &AppState, id: Uuid) -> Result<JsonValue> {
    state
        .spec_store
        .get(id)
        .await?
        .map(|record| record.spec)
        .ok_or_else(|| Error::SpecNotFound(id.to_string()))
}

fn manifest_response(outcome: GenerationOutcome) -> Response {
    let count = outcome.warnings.len();
    let mut response = (
        StatusCode::OK,
        Json(ManifestResponse {
            manifest: outcome.manifest,
            warnings: outcome.warnings,
        }),
    )
        .into_response();
    response
        .headers_mut()
        .insert(WARNINGS_HEADER, HeaderValue::from(count));
    response
}

fn archive_response(outcome: GenerationOutcome) -> Result<Response> {
    let bytes = outcome
        .archive
        .ok_or_else(|| Error::Internal("archive was not produced".to_string()))?;
    let disposition = format!(
        "attachment; filename=\"{}.tar.gz\"",
        outcome.manifest.artifact_id
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| Error::Internal(format!("invalid content disposition: {e}")))?;

    let mut response = (StatusCode::OK, bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/gzip"),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(WARNINGS_HEADER, HeaderValue::from(outcome.warnings.len()));
    Ok(response)
}
