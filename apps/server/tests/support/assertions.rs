use anyhow::Context as _;
use axum::http::{HeaderMap, StatusCode};
use flate2::read::GzDecoder;
use serde_json::Value;
use std::io::Read as _;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "{context}: unexpected status");
}

/// Assert the standard error envelope and return its message
pub fn assert_error_body(value: &Value, status: StatusCode) -> anyhow::Result<String> {
    assert_eq!(
        value["error"]["status"].as_u64(),
        Some(u64::from(status.as_u16())),
        "error.status"
    );
    value["error"]["message"]
        .as_str()
        .map(str::to_string)
        .context("error.message is a string")
}

pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> anyhow::Result<&'a str> {
    headers
        .get(name)
        .with_context(|| format!("missing header {name}"))?
        .to_str()
        .with_context(|| format!("header {name} is not ASCII"))
}

/// Decompress a `.tar.gz` body and list `(path, contents)` of every entry
pub fn unpack_archive(bytes: &[u8]) -> anyhow::Result<Vec<(String, String)>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut entries = Vec::new();
    for entry in archive.entries().context("read archive entries")? {
        let mut entry = entry?;
        let path = entry.path()?.to_string_lossy().into_owned();
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        entries.push((path, contents));
    }
    Ok(entries)
}
