//! Generation endpoints
//!
//! - POST /api/codegen/manifest and /api/codegen/archive take an inline specification
//! - GET /api/codegen/{id}/manifest and /api/codegen/{id}/archive use a stored one

mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use support::{
    assert_error_body, assert_status, clinic_spec, header_str, parse_json, spec_with_dropped_items,
    to_json_body, unpack_archive, TestApp,
};

const BASE: &str = "src/main/java/org/clinic";

#[tokio::test]
async fn inline_manifest_lists_generated_files() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, headers, body) = app
        .post_json("/api/codegen/manifest", &clinic_spec())
        .await?;
    assert_status(status, StatusCode::OK, "manifest");
    assert_eq!(header_str(&headers, "x-codegen-warnings")?, "0");

    assert_eq!(body["packageNamespace"], "org.clinic");
    assert_eq!(body["artifactId"], "clinic-manager");
    assert_eq!(body["warnings"], json!([]));

    let files: Vec<&str> = body["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f.as_str())
        .collect();
    assert_eq!(files.len(), 2 * 6 + 3);
    assert!(files.contains(&"pom.xml"));
    assert!(files.contains(&format!("{BASE}/domain/Patient.java").as_str()));
    assert!(files.contains(&format!("{BASE}/mapper/DoctorMapper.java").as_str()));

    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    Ok(())
}

#[tokio::test]
async fn manifest_workspace_does_not_outlive_the_request() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (_status, _headers, body) = app
        .post_json("/api/codegen/manifest", &clinic_spec())
        .await?;
    let root = body["workspaceRoot"].as_str().unwrap();
    assert!(!std::path::Path::new(root).exists());
    Ok(())
}

#[tokio::test]
async fn dropped_items_are_reported() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, headers, body) = app
        .post_json("/api/codegen/manifest", &spec_with_dropped_items())
        .await?;
    assert_status(status, StatusCode::OK, "manifest");
    assert_eq!(header_str(&headers, "x-codegen-warnings")?, "2");

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0]["reason"], "blankEntityName");
    assert_eq!(warnings[1]["reason"], "unknownRelationshipKind");
    assert_eq!(body["files"].as_array().unwrap().len(), 6 + 3);
    Ok(())
}

#[tokio::test]
async fn inline_archive_is_a_named_gzip_attachment() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, headers, body) = app
        .request(
            Method::POST,
            "/api/codegen/archive",
            Some(to_json_body(&clinic_spec())?),
        )
        .await?;
    assert_status(status, StatusCode::OK, "archive");
    assert_eq!(header_str(&headers, header::CONTENT_TYPE.as_str())?, "application/gzip");
    assert_eq!(
        header_str(&headers, header::CONTENT_DISPOSITION.as_str())?,
        "attachment; filename=\"clinic-manager.tar.gz\""
    );

    let entries = unpack_archive(&body)?;
    assert_eq!(entries.len(), 2 * 6 + 3);

    let (_, patient) = entries
        .iter()
        .find(|(path, _)| path == &format!("{BASE}/domain/Patient.java"))
        .expect("Patient entity in archive");
    assert!(patient.starts_with("package org.clinic.domain;"));
    assert!(patient.contains("@JoinColumn(name = \"doctor_id\")"));
    Ok(())
}

#[tokio::test]
async fn identical_specs_produce_identical_archives() -> anyhow::Result<()> {
    let app = TestApp::new();
    let body = to_json_body(&clinic_spec())?;

    let (_, _, first) = app
        .request(Method::POST, "/api/codegen/archive", Some(body.clone()))
        .await?;
    let (_, _, second) = app
        .request(Method::POST, "/api/codegen/archive", Some(body))
        .await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn stored_spec_can_be_generated() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (_status, _headers, created) = app.post_json("/api/specs", &clinic_spec()).await?;
    let id = created["id"].as_str().unwrap();

    let (status, _headers, body) = app
        .request(Method::GET, &format!("/api/codegen/{id}/manifest"), None)
        .await?;
    assert_status(status, StatusCode::OK, "stored manifest");
    assert_eq!(parse_json(&body)?["artifactId"], "clinic-manager");

    let (status, headers, body) = app
        .request(Method::GET, &format!("/api/codegen/{id}/archive"), None)
        .await?;
    assert_status(status, StatusCode::OK, "stored archive");
    assert_eq!(header_str(&headers, header::CONTENT_TYPE.as_str())?, "application/gzip");
    assert_eq!(unpack_archive(&body)?.len(), 2 * 6 + 3);
    Ok(())
}

#[tokio::test]
async fn generating_unknown_spec_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new();

    let (status, _headers, _body) = app
        .request(
            Method::GET,
            "/api/codegen/6f1c1d2e-9a4b-4c3d-8e7f-0a1b2c3d4e5f/archive",
            None,
        )
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "unknown spec");
    Ok(())
}

#[tokio::test]
async fn invalid_specs_are_bad_requests() -> anyhow::Result<()> {
    let app = TestApp::new();

    for spec in [
        json!({"name": "no entities"}),
        json!({"entities": "Doctor"}),
        json!({"packageNamespace": "com..demo", "entities": []}),
    ] {
        let (status, _headers, body) = app.post_json("/api/codegen/manifest", &spec).await?;
        assert_status(status, StatusCode::BAD_REQUEST, &spec.to_string());
        assert_error_body(&body, StatusCode::BAD_REQUEST)?;
    }
    Ok(())
}

#[tokio::test]
async fn configured_limits_are_enforced() -> anyhow::Result<()> {
    let app = TestApp::new_with_config(|config| config.codegen.max_entities = 1);

    let (status, _headers, body) = app
        .post_json("/api/codegen/archive", &clinic_spec())
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "too many entities");
    let message = assert_error_body(&body, StatusCode::BAD_REQUEST)?;
    assert!(message.contains("exceeds limit"));
    Ok(())
}

#[tokio::test]
async fn project_files_follow_server_config() -> anyhow::Result<()> {
    let app = TestApp::new_with_config(|config| config.codegen.project_files = false);

    let (_status, _headers, body) = app
        .post_json("/api/codegen/manifest", &clinic_spec())
        .await?;
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2 * 6);
    assert!(!files.contains(&json!("pom.xml")));
    Ok(())
}
