//! Shared HTTP plumbing for provider adapters.

use crate::provider::domain::{ProviderError, ProviderResult};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Sends a prepared request and decodes the JSON body.
///
/// Non-success responses become [`ProviderError::Http`] with the body
/// carried verbatim. Empty success bodies decode to `Value::Null`.
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> ProviderResult<Value> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::Http {
            status: status.as_u16(),
            body,
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|err| ProviderError::Decode(err.to_string()))
}

/// Reads a required string field from a payload object.
pub(crate) fn required_str(value: &Value, field: &str) -> ProviderResult<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| ProviderError::UnexpectedPayload(format!("missing field '{field}'")))
}

/// Reads a required unsigned integer field from a payload object.
pub(crate) fn required_u64(value: &Value, field: &str) -> ProviderResult<u64> {
    value
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| ProviderError::UnexpectedPayload(format!("missing field '{field}'")))
}

/// Reads an optional string field, treating JSON null as absent.
pub(crate) fn optional_str(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Parses a provider timestamp field, when present.
pub(crate) fn timestamp(value: &Value, field: &str) -> Option<DateTime<Utc>> {
    value
        .get(field)
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Reads an array field of string-bearing objects (`[{“name”: …}]`) or
/// plain strings into a label list.
pub(crate) fn label_names(value: &Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .as_str()
                        .map(ToOwned::to_owned)
                        .or_else(|| optional_str(entry, "name"))
                })
                .collect()
        })
        .unwrap_or_default()
}
